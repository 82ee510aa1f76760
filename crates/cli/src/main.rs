use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use diabp_core::config::{analytics_days_from_env_value, analytics_seed_from_env_value};
use diabp_core::prescription::PRESCRIPTION_TITLE;
use diabp_core::{
    assess, generate_series, render_report, screen_frame, validate_observation, AssessmentResult,
    Condition, ConversationLog, LandmarkFrame, NonEmptyText, PatientObservation, Prescription,
    Responder,
};
use std::io::BufRead;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "diabp")]
#[command(about = "DiaBP diabetes and hypertension screening CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ConditionArg {
    Diabetes,
    Hypertension,
}

impl From<ConditionArg> for Condition {
    fn from(arg: ConditionArg) -> Self {
        match arg {
            ConditionArg::Diabetes => Condition::Diabetes,
            ConditionArg::Hypertension => Condition::Hypertension,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Score diabetes and hypertension risk for one set of vitals
    Assess {
        /// Patient name (not used in scoring)
        #[arg(long, default_value = "")]
        name: String,
        /// Age in years
        #[arg(long, default_value_t = 55)]
        age: u32,
        /// Systolic blood pressure (mmHg)
        #[arg(long, default_value_t = 150)]
        sys: i32,
        /// Diastolic blood pressure (mmHg)
        #[arg(long, default_value_t = 90)]
        dia: i32,
        /// Blood glucose (mg/dL)
        #[arg(long, default_value_t = 180)]
        glucose: i32,
        /// HbA1c (%)
        #[arg(long, default_value_t = 8.0)]
        hba1c: f64,
        /// Body mass index
        #[arg(long, default_value_t = 27.0)]
        bmi: f64,
        /// Assess only this condition (both when omitted)
        #[arg(long, value_enum)]
        condition: Option<ConditionArg>,
    },
    /// Talk to the virtual doctor
    Chat {
        /// Message to send; repeat for several turns. Reads stdin lines when omitted.
        #[arg(long = "message", short = 'm')]
        messages: Vec<String>,
    },
    /// Print the digital prescription
    Prescription,
    /// Generate the synthetic blood pressure and glucose series
    Analytics {
        /// Number of days (defaults to DIABP_ANALYTICS_DAYS or 28)
        #[arg(long)]
        days: Option<usize>,
        /// Seed for reproducible values (defaults to DIABP_ANALYTICS_SEED)
        #[arg(long)]
        seed: Option<u64>,
        /// First date of the window, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Write the series as CSV to this path instead of printing it
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Write the PDF clinical report
    Report {
        /// Output path
        #[arg(long, default_value = "DiaBP_Report.pdf")]
        out: PathBuf,
    },
    /// Screen a landmark frame (JSON) for stroke warning signs
    Screen {
        /// Path to the frame JSON file
        frame: PathBuf,
    },
}

fn print_assessment(condition: Condition, result: &AssessmentResult) {
    println!("{}: {}", condition.risk_label(), result.risk_score);
    println!("  Medications:");
    for medication in &result.medications {
        println!("    - {}", medication);
    }
    println!("  Advice:");
    for advice in &result.advice {
        println!("    - {}", advice);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Assess {
            name,
            age,
            sys,
            dia,
            glucose,
            hba1c,
            bmi,
            condition,
        }) => {
            let observation = PatientObservation {
                name,
                age,
                sys,
                dia,
                glucose,
                hba1c,
                bmi,
            };
            if let Err(e) = validate_observation(&observation) {
                eprintln!("Error validating vitals: {}", e);
                return Ok(());
            }
            match condition {
                Some(condition) => {
                    let condition = Condition::from(condition);
                    print_assessment(condition, &condition.assess(&observation));
                }
                None => {
                    let summary = assess(&observation);
                    print_assessment(Condition::Diabetes, &summary.diabetes);
                    print_assessment(Condition::Hypertension, &summary.hypertension);
                }
            }
        }
        Some(Commands::Chat { messages }) => {
            let responder = Responder::new();
            let mut log = ConversationLog::new();

            if messages.is_empty() {
                println!("Describe your symptoms (Ctrl-D to finish).");
                for line in std::io::stdin().lock().lines() {
                    // Blank lines are skipped, like an empty chat box.
                    let Ok(message) = NonEmptyText::new(&line?) else {
                        continue;
                    };
                    println!("AI Doctor: {}", log.exchange(&responder, &message));
                }
            } else {
                for message in messages {
                    let Ok(message) = NonEmptyText::new(&message) else {
                        continue;
                    };
                    log.exchange(&responder, &message);
                }
                for line in log.render_lines() {
                    println!("{}", line);
                }
            }
        }
        Some(Commands::Prescription) => {
            println!("{}", PRESCRIPTION_TITLE);
            print!("{}", Prescription::standard().render());
        }
        Some(Commands::Analytics {
            days,
            seed,
            start,
            csv,
        }) => {
            let days = match days {
                Some(days) => days,
                None => analytics_days_from_env_value(std::env::var("DIABP_ANALYTICS_DAYS").ok())?,
            };
            let seed = match seed {
                Some(seed) => Some(seed),
                None => analytics_seed_from_env_value(std::env::var("DIABP_ANALYTICS_SEED").ok())?,
            };
            let start = start.unwrap_or_else(|| chrono::Local::now().date_naive());

            match generate_series(start, days, seed) {
                Ok(series) => match csv {
                    Some(path) => match std::fs::write(&path, series.to_csv()) {
                        Ok(()) => println!(
                            "Wrote {} days of analytics to {}",
                            series.len(),
                            path.display()
                        ),
                        Err(e) => eprintln!("Error writing {}: {}", path.display(), e),
                    },
                    None => {
                        print!("{}", series.to_csv());
                        if let Some(summary) = series.summary() {
                            println!(
                                "Blood pressure mean {:.1} (min {:.1}, max {:.1})",
                                summary.blood_pressure.mean,
                                summary.blood_pressure.min,
                                summary.blood_pressure.max
                            );
                            println!(
                                "Glucose mean {:.1} (min {:.1}, max {:.1})",
                                summary.glucose.mean, summary.glucose.min, summary.glucose.max
                            );
                        }
                    }
                },
                Err(e) => eprintln!("Error generating analytics: {}", e),
            }
        }
        Some(Commands::Report { out }) => match render_report().and_then(|r| r.write_to(&out)) {
            Ok(()) => println!("Wrote report to {}", out.display()),
            Err(e) => eprintln!("Error writing report: {}", e),
        },
        Some(Commands::Screen { frame }) => {
            let text = std::fs::read_to_string(&frame)?;
            match LandmarkFrame::from_json(&text) {
                Ok(landmarks) => {
                    let verdict = screen_frame(&landmarks);
                    if let Some(banner) = verdict.banner() {
                        println!("{}", banner);
                    } else {
                        println!("No stroke warning signs detected.");
                    }
                    for finding in &verdict.findings {
                        println!("  - {}", finding.describe());
                    }
                    println!("{}", verdict.disclaimer());
                }
                Err(e) => eprintln!("Error reading frame {}: {}", frame.display(), e),
            }
        }
        None => {
            println!("Use --help to see available commands.");
        }
    }

    Ok(())
}
