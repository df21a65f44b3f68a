//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::{ImageEventKind, LeaseEventKind, MetricsDocument, ObjectLocator};
use serde::Serialize;
use tracing::info;

use super::settings;
use crate::cli::InfoArgs;

/// Document info for JSON output
#[derive(Debug, Serialize)]
struct DocumentInfo {
    source: String,
    total_records: usize,
    categories: Vec<CategoryInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    leases: Option<LeaseKinds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<ImageKinds>,
}

#[derive(Debug, Serialize)]
struct CategoryInfo {
    category: String,
    destination: &'static str,
    records: usize,
}

#[derive(Debug, Default, PartialEq, Serialize)]
struct LeaseKinds {
    acquisitions: usize,
    releases: usize,
    ambiguous: usize,
    unknown: usize,
}

#[derive(Debug, Default, PartialEq, Serialize)]
struct ImageKinds {
    image_streams: usize,
    tag_imports: usize,
    ambiguous: usize,
    unknown: usize,
}

/// Execute the `info` command
pub async fn run_info(args: &InfoArgs) -> Result<()> {
    let (source_desc, document) = load_document(args).await?;
    info!(source = %source_desc, records = document.total_records(), "Document loaded");

    let info = build_document_info(source_desc, &document);
    if args.json {
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize document info")?;
        println!("{}", json);
    } else {
        print_document_info(&info);
    }

    Ok(())
}

async fn load_document(args: &InfoArgs) -> Result<(String, MetricsDocument)> {
    if let Some(path) = &args.input {
        let document = ingestion::read_document_file(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return Ok((path.display().to_string(), document));
    }

    let gcs_path = args
        .gcs_path
        .as_deref()
        .context("Either --input or --gcs-path is required")?;
    let locator: ObjectLocator = gcs_path
        .parse()
        .with_context(|| format!("Invalid --gcs-path '{gcs_path}'"))?;

    let config = settings::base_config(&args.source)?;
    let source = settings::object_source(&config, &args.source)?;
    let document = ingestion::fetch_document(&source, &locator)
        .await
        .with_context(|| format!("Failed to read {locator}"))?;
    Ok((locator.to_string(), document))
}

fn build_document_info(source: String, document: &MetricsDocument) -> DocumentInfo {
    let categories = document
        .category_counts()
        .into_iter()
        .map(|(category, records)| CategoryInfo {
            category: category.to_string(),
            destination: category.destination(),
            records,
        })
        .collect();

    let leases = (!document.leases.is_empty()).then(|| {
        let mut kinds = LeaseKinds::default();
        for lease in &document.leases {
            match lease.kind() {
                LeaseEventKind::Acquisition => kinds.acquisitions += 1,
                LeaseEventKind::Release => kinds.releases += 1,
                LeaseEventKind::Ambiguous => kinds.ambiguous += 1,
                LeaseEventKind::Unknown => kinds.unknown += 1,
            }
        }
        kinds
    });

    let images = (!document.images.is_empty()).then(|| {
        let mut kinds = ImageKinds::default();
        for image in &document.images {
            match image.kind() {
                ImageEventKind::ImageStream => kinds.image_streams += 1,
                ImageEventKind::TagImport => kinds.tag_imports += 1,
                ImageEventKind::Ambiguous => kinds.ambiguous += 1,
                ImageEventKind::Unknown => kinds.unknown += 1,
            }
        }
        kinds
    });

    DocumentInfo {
        source,
        total_records: document.total_records(),
        categories,
        leases,
        images,
    }
}

fn print_document_info(info: &DocumentInfo) {
    println!("📄 {}", info.source);
    println!("   └─ Records: {}", info.total_records);

    println!("\n🗂️  Categories");
    for (i, category) in info.categories.iter().enumerate() {
        let prefix = if i == info.categories.len() - 1 { "└─" } else { "├─" };
        println!(
            "   {} {:<9} {:>6}  → {}",
            prefix, category.category, category.records, category.destination
        );
    }

    if let Some(leases) = &info.leases {
        println!("\n🔒 Leases");
        println!("   ├─ Acquisitions: {}", leases.acquisitions);
        println!("   ├─ Releases: {}", leases.releases);
        println!("   └─ Other: {}", leases.ambiguous + leases.unknown);
    }

    if let Some(images) = &info.images {
        println!("\n🖼️  Images");
        println!("   ├─ Image streams: {}", images.image_streams);
        println!("   ├─ Tag imports: {}", images.tag_imports);
        println!("   └─ Other: {}", images.ambiguous + images.unknown);
    }

    println!();
}
