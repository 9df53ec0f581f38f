use anyhow::{Context, Result};
use autorename_core::{
    build_all_previews_now, parse_component, parse_schema, render_preview_sample,
    RenameComponent, RenamePreview, Schema,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod config;
mod scan;

use config::{app_paths, load_config, save_config, AppConfig};
use scan::{collect_candidates, ScanOptions, ScanStats};

#[derive(Debug, Parser)]
#[command(name = "autorename-cli")]
#[command(about = "命名スキーマからリネーム後のファイル名をプレビューします (ファイルは変更しません)")]
struct Cli {
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Preview(PreviewArgs),
    Sample(SchemaArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
    Init,
}

#[derive(Debug, Args)]
struct SchemaArgs {
    /// e.g. `folder`, `stem`, `date_created`, `literal:backup`, `sequence:3`
    #[arg(long = "component", short = 'c', conflicts_with = "schema")]
    components: Vec<String>,
    /// Comma separated form of `--component`, e.g. `folder,stem,seq:3`
    #[arg(long)]
    schema: Option<String>,
    #[arg(long)]
    separator: Option<String>,
}

#[derive(Debug, Args)]
struct PreviewArgs {
    folder: PathBuf,
    #[command(flatten)]
    schema: SchemaArgs,
    #[arg(long, overrides_with = "no_recursive")]
    recursive: bool,
    #[arg(long, overrides_with = "recursive")]
    no_recursive: bool,
    #[arg(long, overrides_with = "no_include_hidden")]
    include_hidden: bool,
    #[arg(long, overrides_with = "include_hidden")]
    no_include_hidden: bool,
    #[arg(long)]
    prefix: Option<String>,
    #[arg(long = "ext")]
    extensions: Vec<String>,
    #[arg(long)]
    min_size_mb: Option<f64>,
    #[arg(long)]
    max_size_mb: Option<f64>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Preview(args) => cmd_preview(args),
        Commands::Sample(args) => cmd_sample(args),
        Commands::Config(config) => match config.action {
            ConfigAction::Show => cmd_config_show(),
            ConfigAction::Init => cmd_config_init(),
        },
    }
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn resolve_schema(args: &SchemaArgs, config: &AppConfig) -> Result<Schema> {
    let separator = args
        .separator
        .clone()
        .unwrap_or_else(|| config.separator.clone());
    if let Some(list) = args.schema.as_deref() {
        return Ok(parse_schema(list, &separator)?);
    }

    let components = if args.components.is_empty() {
        config.components.clone()
    } else {
        args.components
            .iter()
            .map(|raw| parse_component(raw))
            .collect::<Result<Vec<RenameComponent>, _>>()?
    };
    Ok(Schema::new(components, separator))
}

/// `--flag` / `--no-flag` win over the config value.
fn flag_or(on: bool, off: bool, config_default: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        config_default
    }
}

fn cmd_preview(args: PreviewArgs) -> Result<()> {
    if !args.folder.is_dir() {
        anyhow::bail!("フォルダが存在しません: {}", args.folder.display());
    }
    if let (Some(min), Some(max)) = (args.min_size_mb, args.max_size_mb) {
        if min > max {
            anyhow::bail!("サイズ下限が上限を超えています: {min} > {max}");
        }
    }

    let config = load_config()?;
    let schema = resolve_schema(&args.schema, &config)?;
    let options = ScanOptions {
        recursive: flag_or(args.recursive, args.no_recursive, config.recursive_default),
        include_hidden: flag_or(
            args.include_hidden,
            args.no_include_hidden,
            config.include_hidden_default,
        ),
        prefix: args.prefix,
        extensions: Vec::new(),
        min_size_mb: args.min_size_mb,
        max_size_mb: args.max_size_mb,
    }
    .with_extensions(&args.extensions);

    let (candidates, scan_stats) = collect_candidates(&args.folder, &options)?;
    let preview = build_all_previews_now(&candidates, &schema);

    match args.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&preview)?);
        }
        OutputFormat::Table => {
            print_table(&preview, &scan_stats);
        }
    }

    if preview.stats.unresolved_duplicates > 0 && !schema.has_sequence() {
        eprintln!("重複する名前があります。連番 (sequence) コンポーネントを追加してください。");
    }
    eprintln!("プレビューのみ: 実ファイルは変更していません。");
    Ok(())
}

fn cmd_sample(args: SchemaArgs) -> Result<()> {
    let config = load_config()?;
    let schema = resolve_schema(&args, &config)?;
    println!("{}", render_preview_sample(&schema));
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    let paths = app_paths()?;
    println!("設定ファイル: {}", paths.config_path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = save_config(&AppConfig::default()).context("初期設定を保存できませんでした")?;
    println!("初期設定を書き込みました: {}", path.display());
    Ok(())
}

fn print_table(preview: &RenamePreview, scan: &ScanStats) {
    println!("元ファイル -> 新ファイル");
    for entry in &preview.entries {
        let marker = if entry.changed { "" } else { " (変更なし)" };
        println!("{} -> {}{}", entry.path, entry.new_name, marker);
    }

    println!(
        "\n集計: scanned={} matched={} hidden_skip={} filter_skip={} changed={} unchanged={} collisions={} duplicates={}",
        scan.scanned_files,
        scan.matched,
        scan.skipped_hidden,
        scan.skipped_by_filter,
        preview.stats.changed,
        preview.stats.unchanged,
        preview.stats.collision_groups,
        preview.stats.unresolved_duplicates
    );
}
