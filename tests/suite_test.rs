use jsv::{Schema, Validator};
use serde::Deserialize;
use serde_json::Value;
use std::fs;

#[derive(Deserialize)]
struct TestSuite {
    name: String,
    schema: Schema,
    instances: Vec<TestCase>,
}

#[derive(Deserialize)]
struct TestCase {
    instance: Value,
    valid: bool,
}

#[test]
fn suites() -> Result<(), std::io::Error> {
    let validator = Validator::new();

    for entry in fs::read_dir("tests/data")? {
        let path = entry?.path();
        let file = fs::read(&path)?;
        let suites: Vec<TestSuite> =
            serde_json::from_slice(&file).unwrap_or_else(|err| panic!("{:?}: {}", path, err));

        for suite in suites {
            for (i, case) in suite.instances.iter().enumerate() {
                let result = validator.validate(&case.instance, &suite.schema);
                assert_eq!(
                    case.valid,
                    result.is_ok(),
                    "{} #{} ({}): {:?}",
                    suite.name,
                    i,
                    case.instance,
                    result.err(),
                );
            }
        }
    }

    Ok(())
}
