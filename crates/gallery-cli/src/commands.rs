use std::sync::Arc;

use anyhow::{bail, Context};
use colored::Colorize;
use serde_json::json;

use gallery_server::{GalleryServer, ServerConfig};
use gallery_store::{FsContentStore, JsonRecordStore, RecordStore};
use gallery_types::{value_text, SkippedEntry};
use gallery_upload::{audit, AuditReport, Projection, UploadService};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Init(args) => cmd_init(&args, format),
        Command::List(args) => cmd_list(&args, format),
        Command::Check(args) => cmd_check(&args, format),
    }
}

/// Read the config file if one was given, then apply flag overrides.
fn resolve_config(args: &StoreArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    Ok(config)
}

fn open_stores(config: &ServerConfig) -> anyhow::Result<(FsContentStore, JsonRecordStore)> {
    let content = FsContentStore::open(config.upload_root())
        .with_context(|| format!("opening upload directory {}", config.upload_root().display()))?;
    Ok((content, JsonRecordStore::new(config.records_file())))
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = resolve_config(&args.store)?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(site_root) = args.site_root {
        config.site_root = site_root;
    }
    println!(
        "{} Serving gallery on {} (data: {})",
        "✓".green().bold(),
        config.bind_addr.to_string().bold(),
        config.data_dir.display()
    );
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(GalleryServer::new(config).serve())?;
    Ok(())
}

fn cmd_init(args: &StoreArgs, format: OutputFormat) -> anyhow::Result<()> {
    let config = resolve_config(args)?;
    let (content, records) = open_stores(&config)?;
    records
        .ensure_initialized()
        .with_context(|| format!("initializing {}", records.path().display()))?;
    let count = records.load().len();
    match format {
        OutputFormat::Json => println!(
            "{}",
            json!({
                "upload_dir": content.root(),
                "records_path": records.path(),
                "entries": count,
            })
        ),
        OutputFormat::Text => {
            println!("{} Gallery ready", "✓".green().bold());
            println!("  Uploads: {}", content.root().display());
            println!("  Records: {} ({} entries)", records.path().display(), count);
        }
    }
    Ok(())
}

fn list_works(config: &ServerConfig) -> anyhow::Result<Projection> {
    let (content, records) = open_stores(config)?;
    Ok(UploadService::new(Arc::new(content), Arc::new(records)).list())
}

fn cmd_list(args: &StoreArgs, format: OutputFormat) -> anyhow::Result<()> {
    let projection = list_works(&resolve_config(args)?)?;
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "works": projection.views,
                "skipped": projection.skipped.iter().map(skipped_json).collect::<Vec<_>>(),
            }))?
        ),
        OutputFormat::Text => {
            if projection.views.is_empty() {
                println!("No works shared yet.");
            }
            for view in &projection.views {
                println!("{} {}", value_text(&view.id).yellow(), value_text(&view.author).bold());
                println!("  Habits: {}", value_text(&view.current_habits));
                println!("  Reflection: {}", value_text(&view.reflection));
                println!("  Scorecard: {}", view.scorecard_image_url.blue());
                println!("  Comic: {}", view.comic_image_url.blue());
            }
            for skipped in &projection.skipped {
                println!("{} entry #{}: {}", "skipped".red(), skipped.index, skipped.reason);
            }
        }
    }
    Ok(())
}

fn check_report(config: &ServerConfig) -> anyhow::Result<AuditReport> {
    let (content, records) = open_stores(config)?;
    Ok(audit(&records.load(), &content)?)
}

fn cmd_check(args: &StoreArgs, format: OutputFormat) -> anyhow::Result<()> {
    let report = check_report(&resolve_config(args)?)?;
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "records": report.record_count,
                "skipped": report.skipped.iter().map(skipped_json).collect::<Vec<_>>(),
                "dangling": report.dangling.iter().map(|d| json!({
                    "work_id": d.work_id,
                    "role": d.role.as_str(),
                    "filename": d.filename,
                })).collect::<Vec<_>>(),
            }))?
        ),
        OutputFormat::Text => {
            for skipped in &report.skipped {
                println!("  {} entry #{}: {}", "malformed:".red(), skipped.index, skipped.reason);
            }
            for dangling in &report.dangling {
                println!(
                    "  {} {} {} -> {}",
                    "missing:".red(),
                    dangling.work_id.yellow(),
                    dangling.role,
                    dangling.filename
                );
            }
            if report.is_clean() {
                println!("{} {} records, no issues.", "✓".green().bold(), report.record_count);
            }
        }
    }
    if !report.is_clean() {
        bail!(
            "{} malformed entries, {} missing files",
            report.skipped.len(),
            report.dangling.len()
        );
    }
    Ok(())
}

fn skipped_json(skipped: &SkippedEntry) -> serde_json::Value {
    json!({
        "index": skipped.index,
        "reason": skipped.reason,
        "entry": skipped.raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_store::ContentStore;
    use gallery_types::{ImageExtension, ImageRole, RecordCollection, WorkId, WorkRecord};

    fn store_args(dir: &std::path::Path) -> StoreArgs {
        StoreArgs {
            config: None,
            data_dir: Some(dir.to_path_buf()),
        }
    }

    fn seed(dir: &std::path::Path, with_files: bool) -> String {
        let config = resolve_config(&store_args(dir)).unwrap();
        let (content, records) = open_stores(&config).unwrap();
        let (scorecard, comic) = if with_files {
            (
                content.put(ImageRole::Scorecard, ImageExtension::Png, b"png").unwrap(),
                content.put(ImageRole::Comic, ImageExtension::Gif, b"gif").unwrap(),
            )
        } else {
            ("gone_scorecard.png".to_string(), "gone_comic.gif".to_string())
        };
        let id = WorkId::new();
        let mut collection = RecordCollection::new();
        collection
            .push(&WorkRecord::new(id, "Alice", "skip gym", "will improve", scorecard, comic))
            .unwrap();
        records.save(&collection).unwrap();
        id.to_string()
    }

    #[test]
    fn config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.toml");
        std::fs::write(&path, "data_dir = \"/from/file\"\nmax_upload_size = 1024\n").unwrap();

        let from_file = resolve_config(&StoreArgs {
            config: Some(path.clone()),
            data_dir: None,
        })
        .unwrap();
        assert_eq!(from_file.data_dir, std::path::PathBuf::from("/from/file"));

        let overridden = resolve_config(&StoreArgs {
            config: Some(path),
            data_dir: Some("/from/flag".into()),
        })
        .unwrap();
        assert_eq!(overridden.data_dir, std::path::PathBuf::from("/from/flag"));
        assert_eq!(overridden.max_upload_size, 1024);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = StoreArgs { config: Some(dir.path().join("absent.toml")), data_dir: None };
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn init_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        cmd_init(&store_args(dir.path()), OutputFormat::Json).unwrap();
        assert!(dir.path().join("uploads").is_dir());
        assert_eq!(std::fs::read_to_string(dir.path().join("works_data.json")).unwrap(), "[]");
    }

    #[test]
    fn list_includes_seeded_work() {
        let dir = tempfile::tempdir().unwrap();
        let id = seed(dir.path(), true);
        let projection = list_works(&resolve_config(&store_args(dir.path())).unwrap()).unwrap();
        assert_eq!(projection.views.len(), 1);
        assert_eq!(projection.views[0].id, id);
        assert!(projection.views[0].scorecard_image_url.ends_with("_scorecard.png"));
        cmd_list(&store_args(dir.path()), OutputFormat::Text).unwrap();
    }

    #[test]
    fn check_passes_on_consistent_store() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path(), true);
        cmd_check(&store_args(dir.path()), OutputFormat::Text).unwrap();
    }

    #[test]
    fn check_fails_on_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let id = seed(dir.path(), false);
        let report = check_report(&resolve_config(&store_args(dir.path())).unwrap()).unwrap();
        assert_eq!(report.dangling.len(), 2);
        assert_eq!(report.dangling[0].work_id, id);
        assert!(cmd_check(&store_args(dir.path()), OutputFormat::Json).is_err());
    }

    #[test]
    fn check_fails_on_malformed_entries() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("works_data.json"), r#"[{"id": "half"}]"#).unwrap();
        let report = check_report(&resolve_config(&store_args(dir.path())).unwrap()).unwrap();
        assert_eq!(report.skipped.len(), 1);
        assert!(cmd_check(&store_args(dir.path()), OutputFormat::Text).is_err());
    }
}
