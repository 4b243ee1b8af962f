use anyhow::Result;
use token_rs_test::{harness::MultiTestClient, scenario::run_scenario};

fn main() -> Result<()> {
    let mut chain = MultiTestClient::new();
    let report = run_scenario(&mut chain)?;

    println!(
        "All done: {} steps, token at {}, caller at {}",
        report.steps.len(),
        report.token1,
        report.caller1
    );

    Ok(())
}
