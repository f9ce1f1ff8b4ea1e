use anyhow::Result;
use serde_json::json;

use coachvital::models::config::Config;
use coachvital::output;

pub fn run_show(human_flag: bool) -> Result<()> {
    let config = Config::load()?;

    if human_flag {
        println!("Coach: {}", config.coach.name.as_deref().unwrap_or("-"));
        println!("Gym:   {}", config.coach.gym.as_deref().unwrap_or("-"));
        if config.aliases.is_empty() {
            println!("No client aliases.");
        } else {
            println!("Aliases:");
            let mut aliases: Vec<_> = config.aliases.iter().collect();
            aliases.sort();
            for (alias, client_id) in aliases {
                println!("  {alias} -> {client_id}");
            }
        }
    } else {
        let out = output::success("config", serde_json::to_value(&config)?);
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        "coach.name" => config.coach.name = Some(value.to_string()),
        "coach.gym" => config.coach.gym = Some(value.to_string()),
        _ => {
            if let Some(alias) = key.strip_prefix("alias.") {
                config
                    .aliases
                    .insert(alias.to_string(), value.to_string());
            } else {
                anyhow::bail!(
                    "unknown config key: {} (expected coach.name, coach.gym, or alias.NAME)",
                    key
                );
            }
        }
    }

    config.save()?;
    let out = output::success("config", json!({ "key": key, "value": value }));
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}
