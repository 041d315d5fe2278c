// Knowledge inspection binary
//
// Purpose: load the class index and advisory table, report shape findings,
// and resolve every known class once as a sanity check.
// Usage: cargo run --bin inspect_knowledge [data_dir]

use leaf_advisor::{DiagnosisEngine, DiagnosisView};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leaf_advisor=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    tracing::info!("Loading data files from {:?}", data_dir);
    let engine = DiagnosisEngine::load(
        &data_dir.join("class_indices.json"),
        &data_dir.join("disease_info.json"),
    )?;

    println!("\n=== ADVISORY TABLE SHAPE FINDINGS ===\n");
    let findings = engine.knowledge().validation_findings();
    if findings.is_empty() {
        println!("No findings. Every record matches its label's health convention.");
    } else {
        for finding in &findings {
            println!("  - {}", finding);
        }
    }

    println!("\n=== RESOLUTION SANITY CHECK ({} classes) ===\n", engine.codec().len());
    let mut without_advisory = 0;
    for (index, label) in engine.codec().entries() {
        let result = engine.resolver().resolve(label, 0.9)?;
        let view = DiagnosisView::from_result(&result);
        let advisory = if result.advisory_available {
            format!("{} sections", view.sections.len())
        } else {
            without_advisory += 1;
            "NO ADVISORY DATA".to_string()
        };
        println!(
            "  [{:>2}] {:<45} {:<10} {}",
            index,
            result.display_name,
            view.badge.label(),
            advisory
        );
    }

    println!(
        "\n{} classes resolved, {} without advisory data.",
        engine.codec().len(),
        without_advisory
    );

    Ok(())
}
