/// Reviewer display name as it appears in the source table.
/// Example: `María G.`
pub type UserName = String;
/// Free-text rating cell before parsing.
/// Examples: `4 estrellas`, `5 estrellas`
pub type RatingText = String;
/// Parsed numeric rating (leading integer of the rating cell).
/// Example: `4`
pub type Rating = i64;
/// Free-text Spanish relative date phrase.
/// Examples: `hace 2 años`, `una semana`, `hace 5 horas`
pub type DatePhrase = String;
/// Column name in the input/output table.
/// Examples: `Usuario`, `Descripcion_Procesada`
pub type ColumnName = String;
/// Single word emitted by the tokenizer after stopword filtering.
/// Example: `comida`
pub type Token = String;
/// Dictionary form produced by the lemmatizer.
/// Example: `bueno` (for `buenas`)
pub type Lemma = String;
/// Identifier for a row source.
/// Examples: `csv::reviews.csv`, `memory`
pub type SourceId = String;
