//! Offline reporting over the flat-file submission store.
//!
//! Reads the combined log files the server writes and prints a summary.
//! Pure read/print; an absent log just means no submissions yet.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use vivaah_common::stats::RsvpStats;
use vivaah_common::store::SubmissionStore;
use vivaah_common::submission::{events_display, Accommodation};

#[derive(Parser)]
#[command(name = "vivaah-report", about = "Wedding site submission reports")]
struct Cli {
    /// Directory holding the submission files.
    #[arg(long, default_value = "form-submissions")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize RSVP submissions.
    Rsvps,
    /// List contact form submissions.
    Contacts,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let store = SubmissionStore::new(&cli.data_dir);

    match cli.command {
        Command::Rsvps => print_rsvps(&store).await,
        Command::Contacts => print_contacts(&store).await,
    }
}

async fn print_rsvps(store: &SubmissionStore) -> anyhow::Result<()> {
    println!("Wedding RSVP Submissions");
    println!("========================\n");

    let rsvps = store.load_rsvps().await?;
    if rsvps.is_empty() {
        println!("No RSVP submissions yet.");
        return Ok(());
    }

    let stats = RsvpStats::from_submissions(&rsvps);
    println!("Total RSVPs: {}\n", stats.total);
    println!("RSVP Summary:");
    println!("  Attending: {}", stats.attending);
    println!("  Not Attending: {}", stats.not_attending);
    println!("  Maybe: {}\n", stats.maybe);
    println!("Total Confirmed Guests: {}\n", stats.total_guests);
    println!("Event Attendance:");
    println!("  Haldi Ceremony: {} people", stats.events.haldi);
    println!("  Mehandi Ceremony: {} people", stats.events.mehandi);
    println!("  Wedding Ceremony: {} people\n", stats.events.wedding);

    println!("Individual RSVPs:");
    println!("=================\n");
    for (index, rsvp) in rsvps.iter().enumerate() {
        println!("{}. {}", index + 1, rsvp.name);
        println!("   Email: {}", rsvp.email);
        println!("   Phone: {}", rsvp.phone);
        println!("   Attendance: {}", rsvp.attendance.as_str());
        println!("   Guests: {}", rsvp.guest_count);
        println!("   Events: {}", events_display(&rsvp.events));
        println!("   Submitted: {}", rsvp.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
        if !rsvp.dietary_restrictions.is_empty() {
            println!("   Dietary: {}", rsvp.dietary_restrictions);
        }
        if rsvp.accommodation != Accommodation::No {
            println!("   Accommodation: {}", rsvp.accommodation.as_str());
        }
        if !rsvp.special_requests.is_empty() {
            println!("   Special Requests: {}", rsvp.special_requests);
        }
        println!();
    }

    Ok(())
}

async fn print_contacts(store: &SubmissionStore) -> anyhow::Result<()> {
    println!("Contact Form Submissions");
    println!("========================\n");

    let submissions = store.load_contacts().await?;
    if submissions.is_empty() {
        println!("No submissions yet.");
        return Ok(());
    }

    for (index, submission) in submissions.iter().enumerate() {
        let preview: String = submission.message.chars().take(100).collect();
        let ellipsis = if submission.message.chars().count() > 100 {
            "..."
        } else {
            ""
        };
        println!(
            "{}. {} ({})",
            index + 1,
            submission.name,
            submission.email
        );
        println!("   Phone: {}", submission.phone);
        println!(
            "   Date: {}",
            submission.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        );
        println!("   Message: {preview}{ellipsis}");
        if let Some(ip) = &submission.ip {
            println!("   IP: {ip}");
        }
        println!();
    }

    println!("Total submissions: {}", submissions.len());
    Ok(())
}
