use chart_motion::ChartError;
use chart_motion::core::{
    Chart, ChartStyle, ChartTerm, ChartType, ColorToken, ValueType, calculate_percents,
    display_value, terms_total,
};

fn terms(values: &[f64]) -> Vec<ChartTerm> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| ChartTerm::new(format!("T{index}"), *value, "#336699"))
        .collect()
}

#[test]
fn percents_of_one_and_two_round_to_thirds() {
    assert_eq!(calculate_percents(&terms(&[1.0, 2.0])), vec![33, 67]);
}

#[test]
fn percents_of_empty_and_all_zero_terms() {
    assert!(calculate_percents(&[]).is_empty());
    assert_eq!(calculate_percents(&terms(&[0.0, 0.0, 0.0])), vec![0, 0, 0]);
}

#[test]
fn single_term_is_one_hundred_percent() {
    assert_eq!(calculate_percents(&terms(&[42.5])), vec![100]);
    assert_eq!(terms_total(&terms(&[42.5])), 42.5);
}

#[test]
fn display_value_follows_value_type() {
    assert_eq!(display_value(ValueType::Value, 12.5, 40), "12.5");
    assert_eq!(display_value(ValueType::Value, 30.0, 40), "30");
    assert_eq!(display_value(ValueType::Percent, 30.0, 40), "40%");
}

#[test]
fn chart_json_uses_camel_case_contract() {
    let chart = Chart::new("c-1", ChartType::Donut, "Budget")
        .with_value_type(ValueType::Percent)
        .with_terms(vec![ChartTerm::new("Rent", 1200.0, "#ff6384")]);

    let json = chart.to_json_pretty().expect("serialize");
    assert!(json.contains("\"type\": \"donut\""));
    assert!(json.contains("\"valueType\": \"percent\""));
    assert!(json.contains("\"backgroundColor\": \"transparent\""));
    assert!(json.contains("\"createdAt\": 0"));
    assert!(!json.contains("thumbnail"));

    let parsed = Chart::from_json_str(&json).expect("deserialize");
    assert_eq!(parsed, chart);
}

#[test]
fn unknown_chart_type_deserializes_to_unknown() {
    let json = r##"{
        "id": "x",
        "type": "pie",
        "title": "Mystery",
        "style": { "font": "Arial", "fontSize": "45px", "backgroundColor": "#ffffff" },
        "valueType": "value",
        "terms": [{ "label": "A", "value": 3, "color": "#00ff00" }],
        "createdAt": 1700000000000,
        "updatedAt": 1700000000001
    }"##;
    let chart = Chart::from_json_str(json).expect("unknown types are accepted");
    assert_eq!(chart.chart_type, ChartType::Unknown);
    assert_eq!(chart.style.background_color, ColorToken::new("#ffffff"));
    assert_eq!(chart.updated_at, 1_700_000_000_001);
}

#[test]
fn negative_or_non_finite_values_are_rejected() {
    let negative = Chart::new("n", ChartType::Bars, "Neg").with_terms(terms(&[1.0, -2.0]));
    assert!(matches!(negative.validate(), Err(ChartError::InvalidData(_))));

    let nan = Chart::new("n", ChartType::Bars, "NaN").with_terms(terms(&[f64::NAN]));
    assert!(matches!(nan.validate(), Err(ChartError::InvalidData(_))));
}

#[test]
fn content_ignores_identity_and_timestamps() {
    let mut first = Chart::new("a", ChartType::Bars, "Same").with_terms(terms(&[1.0]));
    let mut second = first.clone();
    second.id = "b".to_owned();
    second.updated_at = 99;
    second.thumbnail = Some("data:image/png;base64,".to_owned());
    assert_eq!(first.content(), second.content());

    first.style = ChartStyle {
        background_color: ColorToken::new("#000000"),
        ..ChartStyle::default()
    };
    assert_ne!(first.content(), second.content());
}
