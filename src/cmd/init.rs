use anyhow::Result;
use std::io::{self, Write};

use coachvital::db::Database;
use coachvital::models::config::Config;

pub fn run(skip: bool) -> Result<()> {
    let mut config = Config::load().unwrap_or_default();

    if !skip {
        println!("CoachVital - Initial Setup\n");

        let name = prompt_string("Coach name")?;
        if !name.is_empty() {
            config.coach.name = Some(name);
        }
        let gym = prompt_string("Gym or studio (optional)")?;
        if !gym.is_empty() {
            config.coach.gym = Some(gym);
        }

        config.save()?;
        Database::open(&Config::db_path())?;

        println!("\nSetup complete. Data stored in {:?}", Config::data_dir());
    } else {
        config.save()?;
        Database::open(&Config::db_path())?;
        println!("Config initialized with defaults at {:?}", Config::path());
    }

    Ok(())
}

fn prompt_string(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf.trim().to_string())
}
