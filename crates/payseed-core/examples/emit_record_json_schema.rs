use payseed_core::{EntityKind, record_json_schema};

fn main() {
    for kind in EntityKind::ALL {
        let schema = record_json_schema(kind);
        let json = serde_json::to_string_pretty(&schema).expect("serialize json schema");
        println!("// {kind}\n{json}");
    }
}
