use std::env;

use serde::Deserialize;
use serde_json::json;

const CASES: &[(&str, Option<&str>)] = &[
    ("94107", Some("yes")),
    ("10001", Some("no")),
    ("Petaluma, CA", Some("yes")),
    ("sf", Some("yes")),
    ("sfo", Some("no")),
    ("   ", None),
];

#[derive(Deserialize)]
struct CheckResponse {
    status: String,
    message: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let base = env::var("TESTER_URL").unwrap_or_else(|_| "http://localhost:1111".to_string());
    let client = reqwest::Client::new();
    let mut failures = 0;

    for (input, expected) in CASES {
        let response = client
            .post(format!("{base}/api/delivery-check"))
            .json(&json!({ "input": input }))
            .send()
            .await?;

        let status = response.status();

        let actual = if status.is_success() {
            let body: CheckResponse = response.json().await?;
            println!("{input:?}: {} ({})", body.status, body.message);
            Some(body.status)
        } else {
            println!("{input:?}: rejected with {status}");
            None
        };

        if actual.as_deref() != *expected {
            println!("  expected {expected:?}");
            failures += 1;
        }
    }

    println!("\n{} passed, {failures} failed", CASES.len() - failures);

    if failures > 0 {
        std::process::exit(1);
    }

    Ok(())
}
