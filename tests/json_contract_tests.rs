use mathviz_charts::api::{CHART_DESCRIPTOR_JSON_SCHEMA_V1, ChartDescriptorJsonContractV1};
use mathviz_charts::charts::ChartId;
use mathviz_charts::error::ChartError;
use mathviz_charts::render::{ChartDescriptor, TraceKind};
use serde_json::Value;

fn kinds(descriptor: &ChartDescriptor) -> Vec<TraceKind> {
    descriptor.data.iter().map(|trace| trace.kind()).collect()
}

#[test]
fn exported_contract_parses_back_with_the_same_structure() {
    for chart in ChartId::ALL {
        let contract = chart.export_contract_v1();
        let json = contract.to_json_pretty().expect("serialize contract");
        let parsed = ChartDescriptorJsonContractV1::from_json_str(&json).expect("parse contract");

        assert_eq!(parsed.schema_version, CHART_DESCRIPTOR_JSON_SCHEMA_V1);
        assert_eq!(parsed.chart, chart);
        assert_eq!(kinds(&parsed.descriptor), kinds(&contract.descriptor));
        assert_eq!(
            parsed.descriptor.layout.title_text(),
            contract.descriptor.layout.title_text()
        );
        assert_eq!(
            parsed.descriptor.layout.scenes.len(),
            contract.descriptor.layout.scenes.len()
        );
        parsed
            .descriptor
            .validate()
            .unwrap_or_else(|err| panic!("{chart} parsed invalid: {err}"));
    }
}

#[test]
fn descriptor_json_uses_the_engine_field_names() {
    let json = ChartId::PartialDerivativeSlices
        .produce()
        .to_json_pretty()
        .expect("serialize");
    let value: Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["data"][0]["type"], "surface");
    assert_eq!(value["layout"]["scene"]["domain"]["x"][0], 0.0);
    assert_eq!(value["layout"]["scene2"]["domain"]["x"][1], 1.0);
    assert!(value["layout"]["annotations"].as_array().is_some());
    assert!(value["layout"].get("scenes").is_none());
}

#[test]
fn colors_are_written_as_css_strings() {
    let json = ChartId::CallPayoff
        .produce()
        .to_json_pretty()
        .expect("serialize");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    let color = value["data"][0]["line"]["color"]
        .as_str()
        .expect("line color is a string");
    assert!(color.starts_with("rgba("), "{color}");
}

#[test]
fn compat_reader_accepts_bare_and_enveloped_payloads() {
    let chart = ChartId::DoubleIntegralBoxes;
    let bare = chart.produce().to_json_pretty().expect("bare");
    let enveloped = chart.export_contract_v1().to_json_compact().expect("envelope");

    let from_bare = ChartDescriptor::from_json_compat_str(&bare).expect("bare parses");
    let from_envelope = ChartDescriptor::from_json_compat_str(&enveloped).expect("envelope parses");
    assert_eq!(kinds(&from_bare), kinds(&from_envelope));
    assert_eq!(from_bare.trace_count(), 17);
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let mut value =
        serde_json::to_value(ChartId::SaddleSurface.export_contract_v1()).expect("to value");
    value["schema_version"] = Value::from(2);
    let err = ChartDescriptorJsonContractV1::from_json_str(&value.to_string())
        .expect_err("version 2 is unknown");
    assert!(matches!(err, ChartError::Serialization(message) if message.contains('2')));
}

#[test]
fn garbage_input_is_a_serialization_error() {
    let err = ChartDescriptor::from_json_compat_str("{\"data\": 3}").expect_err("not a chart");
    assert!(matches!(err, ChartError::Serialization(_)));
}

#[test]
fn compat_reader_tolerates_extra_engine_layout_keys() {
    let mut value =
        serde_json::to_value(ChartId::BlackScholesGreeks.produce()).expect("to value");
    value["layout"]["width"] = Value::from(800);
    value["layout"]["hovermode"] = Value::from("closest");

    let parsed = ChartDescriptor::from_json_compat_str(&value.to_string()).expect("parses");
    assert_eq!(parsed.layout.scenes.len(), 2);
    assert_eq!(parsed.layout.height, Some(520));
    parsed.validate().expect("still valid");
}
