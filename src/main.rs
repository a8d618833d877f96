//! Lava Run headless runner
//!
//! Plays each level plan to completion with a stationary player and logs
//! the outcome.
//!
//! Usage: `lava-run [settings.json] [levels.json]`

use lava_run::sim::{LevelParser, LevelPlan, Status, load_plans, run};
use lava_run::{Settings, SimError};

/// Levels used when no plan file is given
const BUILTIN_PLANS: &str = r#"[
    {
        "name": "Coin overhead",
        "rows": [
            "     ",
            " o   ",
            " @   ",
            "xxxxx"
        ]
    },
    {
        "name": "Fire rain",
        "rows": [
            "  v  ",
            "     ",
            "  @  ",
            "xxxxx"
        ]
    }
]"#;

fn read(path: &str) -> Result<String, SimError> {
    log::debug!("Reading {}", path);
    Ok(std::fs::read_to_string(path)?)
}

fn play(settings: &Settings, plans: &[LevelPlan]) -> Result<Vec<Status>, SimError> {
    let mut parser = LevelParser::standard(settings.seed);
    let mut outcomes = Vec::with_capacity(plans.len());
    for (index, plan) in plans.iter().enumerate() {
        let name = plan.name.as_deref().unwrap_or("unnamed");
        let mut level = plan.build(&mut parser)?.with_finish_delay(settings.finish_delay);
        let status = run(&mut level, settings)?;
        log::info!("Level {} ({}): {:?}", index + 1, name, status);
        outcomes.push(status);
    }
    Ok(outcomes)
}

fn try_main() -> Result<(), SimError> {
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::from_json(&read(&path)?)?,
        None => Settings::default(),
    };
    let plans = match args.next() {
        Some(path) => load_plans(&read(&path)?)?,
        None => load_plans(BUILTIN_PLANS)?,
    };

    let outcomes = play(&settings, &plans)?;
    let won = outcomes.iter().filter(|s| **s == Status::Won).count();
    println!("{} of {} levels won", won, outcomes.len());
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lava Run (headless) starting...");

    if let Err(err) = try_main() {
        log::error!("{}", err);
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_plans_finish() {
        let plans = load_plans(BUILTIN_PLANS).unwrap();
        let outcomes = play(&Settings::default(), &plans).unwrap();
        assert_eq!(outcomes, vec![Status::Won, Status::Lost]);
    }
}
