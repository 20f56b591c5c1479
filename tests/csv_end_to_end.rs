use chrono::NaiveDate;
use tempfile::tempdir;

use review_cleaner::output::{write_json_lines, write_records};
use review_cleaner::{
    AnnotatorConfig, CsvRowSource, OutputFormat, PipelineConfig, PipelineError, RecordPipeline,
    Sentiment,
};

const REVIEWS: &str = "Usuario,Rating,Fecha,Descripcion,Lugar\n\
María G.,5 estrellas,hace 2 años,\"Excelente lugar, muy limpio.\",Parque\n\
María G.,5 estrellas,hace 2 años,Otra vez,Parque\n\
Pedro,1 estrella,hace 4 meses,El servicio fue pésimo,Museo\n\
Lucía,3 estrellas,una semana,,Playa\n\
Jorge,4 estrellas,ayer,Playas hermosas,Playa\n";

fn pipeline(config: AnnotatorConfig) -> RecordPipeline {
    let reference = NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    RecordPipeline::new(
        config.build_annotator().unwrap(),
        PipelineConfig::default().with_fixed_reference(reference),
    )
}

#[test]
fn csv_file_is_cleaned_end_to_end() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reviews.csv");
    std::fs::write(&path, REVIEWS).unwrap();

    let source = CsvRowSource::from_path(&path).unwrap();
    let output = pipeline(AnnotatorConfig::default()).run_source(&source).unwrap();
    let records = &output.records;

    assert_eq!(records.len(), 4);
    assert_eq!(output.summary.duplicates_dropped, 1);
    assert_eq!(output.summary.unrecognized_dates, 1);

    assert_eq!(records[0].user, "María G.");
    assert_eq!(records[0].resolved_date_text().as_deref(), Some("15/06/2022"));
    assert_eq!(records[0].sentiment, Sentiment::Positive);
    assert_eq!(records[0].tokens, vec!["excelente", "lugar", "limpio"]);

    assert_eq!(records[1].rating, 1);
    assert_eq!(records[1].resolved_date_text().as_deref(), Some("15/02/2024"));
    assert_eq!(records[1].sentiment, Sentiment::Negative);

    assert_eq!(records[2].resolved_date_text().as_deref(), Some("08/06/2024"));
    assert_eq!(records[2].description, "");
    assert!(records[2].tokens.is_empty());

    assert_eq!(records[3].resolved_date, None);
}

#[test]
fn lemma_dictionary_and_extra_stopwords_apply() {
    let dir = tempdir().unwrap();
    let lemmas = dir.path().join("lemmas.tsv");
    std::fs::write(&lemmas, "playas\tplaya\nhermosas\thermoso\n").unwrap();

    let config = AnnotatorConfig::default()
        .with_extra_stopwords(["lugar"])
        .with_lemma_dictionary(&lemmas);
    let source = CsvRowSource::from_reader("inline", REVIEWS.as_bytes()).unwrap();
    let records = pipeline(config).run_source(&source).unwrap().records;

    assert_eq!(records[0].tokens, vec!["excelente", "limpio"]);
    assert_eq!(records[3].tokens, vec!["playas", "hermosas"]);
    assert_eq!(records[3].lemmas, vec!["playa", "hermoso"]);
}

#[test]
fn missing_required_column_is_reported_before_processing() {
    let source =
        CsvRowSource::from_reader("inline", "Usuario,Rating,Descripcion\nana,5,hola\n".as_bytes())
            .unwrap();
    let err = pipeline(AnnotatorConfig::default())
        .run_source(&source)
        .unwrap_err();
    assert!(matches!(err, PipelineError::MissingColumn { column, .. } if column == "Fecha"));
}

#[test]
fn writers_emit_every_record() {
    let source = CsvRowSource::from_reader("inline", REVIEWS.as_bytes()).unwrap();
    let records = pipeline(AnnotatorConfig::default())
        .run_source(&source)
        .unwrap()
        .records;

    let mut jsonl = Vec::new();
    write_json_lines(&records, &mut jsonl).unwrap();
    let jsonl = String::from_utf8(jsonl).unwrap();
    assert_eq!(jsonl.lines().count(), records.len());
    let last: serde_json::Value = serde_json::from_str(jsonl.lines().last().unwrap()).unwrap();
    assert!(last["Fecha"].is_null());
    assert!(last.get("Lugar").is_none());

    let mut csv_out = Vec::new();
    write_records(&records, OutputFormat::Csv, &mut csv_out).unwrap();
    let mut reader = csv::Reader::from_reader(csv_out.as_slice());
    assert_eq!(reader.records().count(), records.len());
}
