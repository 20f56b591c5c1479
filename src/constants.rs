/// Column names of the review table.
pub mod columns {
    /// Reviewer name.
    pub const USER: &str = "Usuario";
    /// Rating cell; free text on input, integer on output.
    pub const RATING: &str = "Rating";
    /// Date cell; relative phrase on input, `dd/mm/yyyy` on output.
    pub const DATE: &str = "Fecha";
    /// Original review text.
    pub const DESCRIPTION: &str = "Descripcion";
    /// Normalized review text.
    pub const NORMALIZED_DESCRIPTION: &str = "Descripcion_Procesada";
    /// Sentiment label.
    pub const SENTIMENT: &str = "Sentimiento";
    /// Stopword-filtered tokens.
    pub const TOKENS: &str = "Tokens";
    /// Lemmas of the filtered tokens.
    pub const LEMMAS: &str = "Lematizer";

    /// Columns every input table must carry.
    pub const REQUIRED_INPUT: [&str; 4] = [USER, RATING, DATE, DESCRIPTION];

    /// Output columns in emission order.
    pub const OUTPUT: [&str; 8] = [
        USER,
        RATING,
        DATE,
        DESCRIPTION,
        NORMALIZED_DESCRIPTION,
        SENTIMENT,
        TOKENS,
        LEMMAS,
    ];
}

/// Constants used by the relative date resolver.
pub mod dates {
    /// Rendering format for resolved dates.
    pub const RESOLVED_DATE_FORMAT: &str = "%d/%m/%Y";
    /// Keywords selecting the year rule.
    pub const YEAR_KEYWORDS: [&str; 2] = ["año", "años"];
    /// Keyword selecting the month rule.
    pub const MONTH_KEYWORD: &str = "mes";
    /// Keyword selecting the week rule.
    pub const WEEK_KEYWORD: &str = "semana";
    /// Keyword selecting the day rule.
    pub const DAY_KEYWORD: &str = "día";
    /// Keyword selecting the hour rule.
    pub const HOUR_KEYWORD: &str = "hora";
    /// Masculine "one" shorthand (years, months, days).
    pub const ONE_MASCULINE: &str = "un";
    /// Feminine "one" shorthand (weeks).
    pub const ONE_FEMININE: &str = "una";
}

/// Constants used by the CLI runner.
pub mod app {
    /// Reference timestamp format accepted by `--reference`.
    pub const REFERENCE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
}
