use clap::{Parser, Subcommand};
use healthbro_core::{
    constants::{DEFAULT_PROFILE_FILENAME, TRIAGE_CONFIG_ENV},
    resolve_triage_config, triage_config_from_env_value, JsonFileProfileRepository,
    ProfileRepository, RawVitals, SymptomSet, TriageEngine, UserProfile, Verdict,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "healthbro")]
#[command(about = "HealthBro triage CLI")]
struct Cli {
    /// YAML file overriding the triage thresholds and keyword lists
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print verdicts as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess vital signs
    Vitals {
        /// Heart rate in beats per minute
        #[arg(long)]
        heart_rate: Option<String>,
        /// Blood pressure as systolic/diastolic, e.g. 120/80
        #[arg(long)]
        blood_pressure: Option<String>,
        /// Temperature in degrees Celsius
        #[arg(long)]
        temperature: Option<String>,
        /// Oxygen saturation percentage
        #[arg(long)]
        spo2: Option<String>,
        /// Respiratory rate in breaths per minute
        #[arg(long)]
        respiratory_rate: Option<String>,
    },
    /// Assess a list of symptoms
    Symptoms {
        /// Symptom labels, e.g. "Fever" "Cough"
        #[arg(required = true)]
        labels: Vec<String>,
    },
    /// List the triage rules in evaluation order
    Rules,
    /// Show or update the stored user profile
    Profile {
        /// Profile JSON file
        #[arg(long, default_value = DEFAULT_PROFILE_FILENAME)]
        profile: PathBuf,
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Print the stored profile
    Show,
    /// Update profile fields; omitted fields keep their current value
    Set {
        #[arg(long)]
        name: Option<String>,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        occupation: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("healthbro_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Vitals {
            heart_rate,
            blood_pressure,
            temperature,
            spo2,
            respiratory_rate,
        }) => {
            let engine = build_engine(cli.config)?;
            let reading = RawVitals {
                heart_rate,
                blood_pressure,
                temperature,
                oxygen_saturation: spo2,
                respiratory_rate,
            }
            .to_reading();
            print_verdict(&engine.assess_vitals(&reading), cli.json)?;
        }
        Some(Commands::Symptoms { labels }) => {
            let engine = build_engine(cli.config)?;
            let symptoms = SymptomSet::new(labels);
            if symptoms.is_empty() {
                anyhow::bail!("at least one non-blank symptom is required");
            }
            print_verdict(&engine.assess_symptoms(&symptoms), cli.json)?;
        }
        Some(Commands::Rules) => {
            let engine = build_engine(cli.config)?;
            println!("Vitals (first match wins):");
            print_rule_ids(&engine.vitals_rule_ids());
            println!("Symptom conditions (first match wins):");
            print_rule_ids(&engine.condition_rule_ids());
            println!("Symptom severity (first match wins):");
            print_rule_ids(&engine.severity_rule_ids());
        }
        Some(Commands::Profile { profile, action }) => {
            let repo = JsonFileProfileRepository::new(profile);
            match action {
                ProfileAction::Show => {
                    let profile = repo.load()?;
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&profile)?);
                    } else {
                        print_profile(&profile);
                    }
                }
                ProfileAction::Set {
                    name,
                    dob,
                    email,
                    phone,
                    occupation,
                    location,
                } => {
                    let mut profile = repo.load()?;
                    let updates = [
                        (&mut profile.name, name),
                        (&mut profile.dob, dob),
                        (&mut profile.email, email),
                        (&mut profile.phone, phone),
                        (&mut profile.occupation, occupation),
                        (&mut profile.location, location),
                    ];
                    for (field, value) in updates {
                        if let Some(value) = value {
                            *field = value;
                        }
                    }
                    repo.save(&profile)?;
                    println!("Saved profile to {}", repo.path().display());
                }
            }
        }
        None => {
            println!("Use 'healthbro --help' for commands");
        }
    }

    Ok(())
}

/// `--config` wins over `HEALTHBRO_TRIAGE_CONFIG`; with neither, the built-in rules apply.
fn build_engine(config_path: Option<PathBuf>) -> anyhow::Result<TriageEngine> {
    let config = match config_path {
        Some(path) => resolve_triage_config(Some(path))?,
        None => triage_config_from_env_value(std::env::var(TRIAGE_CONFIG_ENV).ok())?,
    };
    Ok(TriageEngine::new(config)?)
}

fn print_verdict(verdict: &Verdict, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(verdict)?);
        return Ok(());
    }

    println!("Severity: {}", verdict.severity());
    if !verdict.candidate_conditions().is_empty() {
        println!(
            "Possible conditions: {}",
            verdict.candidate_conditions().join(", ")
        );
    }
    println!("Recommendation: {}", verdict.recommendation());
    println!("Immediate action: {}", verdict.immediate_action());
    println!("Rules fired: {}", verdict.fired_rules().join(", "));
    Ok(())
}

fn print_rule_ids(ids: &[&str]) {
    for (position, id) in ids.iter().enumerate() {
        println!("  {}. {}", position + 1, id);
    }
}

fn print_profile(profile: &UserProfile) {
    println!("Name: {}", profile.name);
    println!("Date of birth: {}", profile.dob);
    println!("Email: {}", profile.email);
    println!("Phone: {}", profile.phone);
    println!("Occupation: {}", profile.occupation);
    println!("Location: {}", profile.location);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "healthbro",
            "vitals",
            "--spo2",
            "88",
            "--blood-pressure",
            "150/95",
            "--json",
        ])
        .expect("parse");
        assert!(cli.json);
        match cli.command {
            Some(Commands::Vitals {
                spo2,
                blood_pressure,
                heart_rate,
                ..
            }) => {
                assert_eq!(spo2.as_deref(), Some("88"));
                assert_eq!(blood_pressure.as_deref(), Some("150/95"));
                assert!(heart_rate.is_none());
            }
            _ => panic!("expected vitals command"),
        }
    }

    #[test]
    fn symptoms_need_at_least_one_label() {
        assert!(Cli::try_parse_from(["healthbro", "symptoms"]).is_err());
        let cli = Cli::try_parse_from(["healthbro", "symptoms", "Fever", "Cough"]).expect("parse");
        assert!(matches!(
            cli.command,
            Some(Commands::Symptoms { ref labels }) if labels.len() == 2
        ));
    }

    #[test]
    fn profile_defaults_to_local_file() {
        let cli = Cli::try_parse_from(["healthbro", "profile", "show"]).expect("parse");
        match cli.command {
            Some(Commands::Profile { profile, action }) => {
                assert_eq!(profile, PathBuf::from(DEFAULT_PROFILE_FILENAME));
                assert!(matches!(action, ProfileAction::Show));
            }
            _ => panic!("expected profile command"),
        }
    }
}
