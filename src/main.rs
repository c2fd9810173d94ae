use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use keyword_match::{cli, config, error, export, preview, reader, selector};
use keyword_match_common::{BatchMatcher, MatchConfig, TableRole};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Match {
            dictionary,
            text,
            key_column,
            text_column,
            output,
            format,
            prefix,
            preview: preview_rows,
            dictionary_sheet,
            text_sheet,
        } => {
            println!("🔍 keyword-match - 一括照合\n");
            let preview_rows = preview_rows.unwrap_or(config.preview_rows);

            // 1. 辞書読み込み
            println!("[1/4] 辞書を読み込み中...");
            let dictionary_table = reader::load_table(&dictionary, dictionary_sheet.as_deref())?;
            println!("✔ {}行 x {}列", dictionary_table.len(), dictionary_table.width());
            let key_column = selector::resolve_column(
                &dictionary_table,
                key_column,
                TableRole::Dictionary,
                "辞書のキーワード列",
                "--key-column",
            )?;
            println!("✔ 「{}」列をキーワードとして使用", key_column);
            if preview_rows > 0 {
                println!("{}\n", preview::render(&dictionary_table, preview_rows));
            }

            // 2. テキスト読み込み
            println!("[2/4] 照合対象を読み込み中...");
            let text_table = reader::load_table(&text, text_sheet.as_deref())?;
            println!("✔ {}行 x {}列", text_table.len(), text_table.width());
            let text_column = selector::resolve_column(
                &text_table,
                text_column,
                TableRole::Text,
                "照合対象のテキスト列",
                "--text-column",
            )?;
            println!("✔ 「{}」列を照合対象として使用", text_column);
            if preview_rows > 0 {
                println!("{}\n", preview::render(&text_table, preview_rows));
            }

            // 3. 照合
            println!("[3/4] 照合中...");
            let match_config = MatchConfig::new(key_column, text_column)
                .with_prefix(prefix.unwrap_or_else(|| config.match_prefix.clone()));
            let matcher = BatchMatcher::new(&dictionary_table, &text_table, &match_config)?;
            println!("- キーワード数: {}", matcher.index().len());

            let progress = ProgressBar::new(text_table.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len}行 ({eta})")
                    .map(|style| style.progress_chars("=>-"))
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            let result = matcher.run_with_progress(&text_table, |n| progress.set_position(n as u64));
            progress.finish_and_clear();
            let result = result?;

            let stats = result.stats;
            if stats.matched == 0 {
                println!("✔ 照合完了、ただしキーワードは1件も見つかりませんでした\n");
            } else {
                println!("✔ 照合完了: {}/{}行でキーワードを検出\n", stats.matched, stats.total);
            }
            if stats.faults > 0 {
                println!("⚠ 索引と一致しないマッチ: {}行（照合なしとして出力）", stats.faults);
            }
            if preview_rows > 0 {
                println!("{}\n", preview::render(&result.table, preview_rows));
            }

            // 4. 保存
            println!("[4/4] 結果を保存中...");
            let format = export::resolve_format(format, output.as_deref(), config.default_format);
            let output_path = output.unwrap_or_else(|| export::default_output_path(&text, format));
            export::export_table(&result.table, format, &output_path, config.csv_bom)?;
            println!("✔ 結果を保存: {}", output_path.display());

            println!("\n✅ 一括照合完了");
        }

        Commands::Columns { file, sheet, preview: preview_rows } => {
            let table = reader::load_table(&file, sheet.as_deref())?;
            println!("📋 {} ({}行)\n", file.display(), table.len());
            for (i, column) in table.columns().iter().enumerate() {
                println!("  {}) {}", i + 1, column);
            }
            let preview_rows = preview_rows.unwrap_or(config.preview_rows);
            if preview_rows > 0 {
                println!("\n{}", preview::render(&table, preview_rows));
            }
        }

        Commands::Config { set_prefix, set_preview_rows, set_format, csv_bom, show } => {
            let mut config = config;
            let changed = set_prefix.is_some()
                || set_preview_rows.is_some()
                || set_format.is_some()
                || csv_bom.is_some();

            if let Some(prefix) = set_prefix {
                config.set_match_prefix(prefix)?;
            }
            if let Some(rows) = set_preview_rows {
                config.preview_rows = rows;
            }
            if let Some(format) = set_format {
                config.default_format = Some(format);
            }
            if let Some(bom) = csv_bom {
                config.csv_bom = bom;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  照合列の接頭辞: {}", config.match_prefix);
                println!("  プレビュー行数: {}", config.preview_rows);
                println!(
                    "  既定の出力形式: {}",
                    config
                        .default_format
                        .map(|f| f.to_string())
                        .unwrap_or_else(|| "未設定（拡張子から判定）".into())
                );
                println!("  CSV BOM: {}", if config.csv_bom { "あり" } else { "なし" });
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
