use clap::Parser;
use medcheck::{cli, column_selector, config, error, export, history, logging, report, session};
use cli::{Cli, Commands};
use column_selector::ColumnChoice;
use config::Config;
use error::Result;
use history::HistoryLog;
use medcheck_common::analytics::{price_points, status_counts, ResultSummary};
use medcheck_common::{browse, fuzzy_search, substring_search};
use session::{DetectOutcome, Session};
use std::path::Path;

/// 参照データ（アップロード指定があればそれを使う）
fn reference_session(
    config: &Config,
    reference: Option<&Path>,
    reference_column: Option<String>,
) -> Result<Session> {
    let choice = ColumnChoice::from_args(reference_column, false);
    let upload = reference.map(|path| (path, &choice));
    let (reference, source) = session::load_reference(config.reference_path.as_deref(), upload)?;
    Ok(Session::new(reference, source))
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    logging::init(cli.verbose, &config.log_filter);

    let history_path = config.resolve_history_path(cli.history.clone());
    tracing::debug!(history = %history_path.display(), "履歴ファイル");

    match cli.command {
        Commands::Detect {
            names,
            file,
            column,
            pick_column,
            reference,
            reference_column,
            output,
            format,
            no_history,
        } => {
            println!("💊 medcheck - 医薬品名ミスマッチ検出\n");

            // 1. 入力名を収集
            let choice = ColumnChoice::from_args(column, pick_column);
            let entered = session::collect_entered(
                file.as_deref().map(|path| (path, &choice)),
                names.as_deref(),
            )?;

            if entered.is_empty() {
                println!("⚠ ファイルを指定するか、医薬品名を1つ以上入力してください");
                return Ok(());
            }
            println!("[1/3] {}件の医薬品名を照合します", entered.len());

            // 2. 参照データを準備して照合
            let mut session = reference_session(&config, reference.as_deref(), reference_column)?;
            println!(
                "[2/3] 参照データ: {} ({}件)",
                session.source(),
                session.reference().len()
            );
            if !no_history {
                session = session.with_history(HistoryLog::new(&history_path));
            }

            let (results, logged) = match session.detect(&entered)? {
                DetectOutcome::Checked { results, logged } => (results, logged),
                DetectOutcome::NothingToCheck => return Ok(()),
            };

            // 3. 表示・保存
            println!("[3/3] 結果\n");
            println!("🔍 照合結果");
            println!("{}\n", report::format_results_table(&results));
            println!("📊 スコア比較");
            println!("{}\n", report::format_score_bars(&results));
            println!("{}", report::format_summary(&ResultSummary::from_results(&results)));

            if logged > 0 {
                println!("✔ 履歴に{}件追記: {}", logged, history_path.display());
            }

            if let Some(output_path) = output {
                let format = export::export_results(&results, &output_path, format)?;
                println!("✔ 結果を保存 ({}): {}", format, output_path.display());
            }
        }

        Commands::Search {
            query,
            contains,
            reference,
            reference_column,
        } => {
            let session = reference_session(&config, reference.as_deref(), reference_column)?;
            let reference = session.reference();

            match query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
                None => {
                    println!("🔎 参照データ（先頭{}件）\n", browse(reference).len());
                    println!("{}", report::format_reference_table(browse(reference)));
                }
                Some(q) if contains => {
                    let found: Vec<_> = substring_search(q, reference).into_iter().cloned().collect();
                    if found.is_empty() {
                        println!("❌ 一致する医薬品が見つかりません");
                    } else {
                        println!("{}", report::format_reference_table(&found));
                    }
                }
                Some(q) => {
                    let hits = fuzzy_search(q, reference);
                    if hits.is_empty() {
                        println!("❌ 近い医薬品が見つかりません");
                    } else {
                        println!("候補:");
                        println!("{}", report::format_search_hits(&hits));
                    }
                }
            }
        }

        Commands::History {
            mismatches_only,
            limit,
        } => {
            let log = HistoryLog::new(&history_path);
            let rows = log.load()?;

            if rows.is_empty() {
                println!("履歴はまだありません");
                return Ok(());
            }

            let mut shown: Vec<&history::HistoryRow> = if mismatches_only {
                history::filter_flagged(&rows)
            } else {
                rows.iter().collect()
            };
            if let Some(n) = limit {
                let skip = shown.len().saturating_sub(n);
                shown.drain(..skip);
            }

            println!("📜 検出履歴 ({}件中 {}件表示)\n", rows.len(), shown.len());
            println!("{}", report::format_history(&shown));
        }

        Commands::Analytics {
            reference,
            reference_column,
        } => {
            let session = reference_session(&config, reference.as_deref(), reference_column)?;
            let reference = session.reference();

            println!("📊 参照データ概要 ({})\n", session.source());
            let overview = &reference.entries()[..reference.len().min(30)];
            println!("{}\n", report::format_reference_table(overview));

            let points = price_points(reference);
            if !points.is_empty() {
                println!("💰 価格");
                println!("{}\n", report::format_price_bars(&points));
            }

            println!("📈 履歴集計");
            let rows = HistoryLog::new(&history_path).load()?;
            if rows.is_empty() {
                println!("検出を実行すると集計が表示されます");
            } else {
                let counts = status_counts(rows.iter().map(|r| r.status.as_str()));
                println!("{}", report::format_count_bars(&counts));
            }
        }

        Commands::Reference {
            reference,
            reference_column,
        } => {
            let session = reference_session(&config, reference.as_deref(), reference_column)?;
            println!("📋 参照データ: {} ({}件)\n", session.source(), session.reference().len());
            println!("{}", report::format_reference_table(session.reference().entries()));
        }

        Commands::Config {
            show,
            set_history,
            set_reference,
            clear_reference,
        } => {
            let mut config = config;

            if let Some(path) = set_history {
                config.set_history_path(path)?;
                println!("✔ 履歴ファイルを設定しました");
            }

            if let Some(path) = set_reference {
                // 'Medicine Name' 列を持つか先に確認
                session::load_reference(Some(path.as_path()), None)?;
                config.set_reference_path(Some(path))?;
                println!("✔ 参照ファイルを設定しました");
            } else if clear_reference {
                config.set_reference_path(None)?;
                println!("✔ 参照ファイルの設定を解除しました（組み込みリストを使用）");
            }

            if show {
                let reference = config
                    .reference_path
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "組み込みリスト".into());
                println!("設定: {}", Config::config_path()?.display());
                println!("  履歴ファイル: {}", config.history_path.display());
                println!("  使用中の履歴: {}", history_path.display());
                println!("  参照データ: {}", reference);
                println!("  ログフィルタ: {}", config.log_filter);
            }
        }
    }

    Ok(())
}
