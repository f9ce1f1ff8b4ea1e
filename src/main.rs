mod cli;
mod cmd;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction, LogCommand, ShowCommand};
use std::process;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { skip } => cmd::init::run(skip),
        Commands::Log { entry } => match entry {
            LogCommand::Session {
                client,
                routine,
                duration,
                status,
                notes,
            } => cmd::log::run_session(
                &client,
                routine.as_deref(),
                duration,
                &status,
                notes.as_deref(),
                cli.date,
                cli.human,
            ),
            LogCommand::Set {
                session,
                exercise,
                specs,
                velocity,
            } => cmd::log::run_set(
                &session,
                &exercise,
                &specs,
                velocity.as_deref(),
                cli.date,
                cli.human,
            ),
            LogCommand::Pr {
                client,
                exercise,
                weight,
                reps,
            } => cmd::log::run_pr(&client, &exercise, weight, reps, cli.date, cli.human),
            LogCommand::Nutrition {
                client,
                calories,
                protein,
                carbs,
                fat,
                meal,
            } => cmd::log::run_nutrition(
                &client,
                calories,
                protein,
                carbs,
                fat,
                meal.as_deref(),
                cli.date,
                cli.human,
            ),
            LogCommand::Exercise { id, name, muscle } => {
                cmd::log::run_exercise(&id, name.as_deref(), muscle.as_deref(), cli.human)
            }
        },
        Commands::Show { what } => match what {
            ShowCommand::Sessions { client, last } => {
                cmd::show::run_sessions(&client, last, cli.human)
            }
            ShowCommand::Prs { client, last } => cmd::show::run_prs(&client, last, cli.human),
            ShowCommand::Nutrition { client, last } => {
                cmd::show::run_nutrition(&client, last, cli.date, cli.human)
            }
            ShowCommand::Exercises => cmd::show::run_exercises(cli.human),
        },
        Commands::Insights { client } => cmd::insights::run(&client, cli.date, cli.human),
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd::config::run_show(cli.human),
            ConfigAction::Set { key, value } => cmd::config::run_set(&key, &value),
        },
    };

    if let Err(e) = result {
        let err = coachvital::output::error("", "general_error", &e.to_string());
        eprintln!("{}", serde_json::to_string(&err).unwrap());
        process::exit(1);
    }
}
