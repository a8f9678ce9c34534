use crate::export::ExportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "medcheck")]
#[command(about = "医薬品名ミスマッチ検出ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 履歴ファイル（設定・環境変数より優先）
    #[arg(long, global = true)]
    pub history: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 医薬品名を参照データベースと照合
    Detect {
        /// 医薬品名（カンマ区切り）
        names: Option<String>,

        /// 医薬品名の入ったファイル (csv/xlsx/txt)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// ファイル内の医薬品名の列
        #[arg(short, long)]
        column: Option<String>,

        /// 列を対話式で選択
        #[arg(long)]
        pick_column: bool,

        /// このセッションだけ使う参照ファイル
        #[arg(short, long)]
        reference: Option<PathBuf>,

        /// 参照ファイル内の医薬品名の列
        #[arg(long)]
        reference_column: Option<String>,

        /// 結果の出力先 (json/csv/xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式（省略時は拡張子から判定）
        #[arg(long)]
        format: Option<ExportFormat>,

        /// 履歴に書き込まない
        #[arg(long)]
        no_history: bool,
    },

    /// 参照データベースを検索
    Search {
        /// 検索語（省略時は先頭25件を表示）
        query: Option<String>,

        /// あいまい検索ではなく部分一致で検索
        #[arg(long)]
        contains: bool,

        /// このセッションだけ使う参照ファイル
        #[arg(short, long)]
        reference: Option<PathBuf>,

        /// 参照ファイル内の医薬品名の列
        #[arg(long)]
        reference_column: Option<String>,
    },

    /// 検出履歴を表示
    History {
        /// 要確認（Mismatch / Possible Mismatch）のみ表示
        #[arg(short, long)]
        mismatches_only: bool,

        /// 末尾（新しいもの）から表示する件数
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// 参照データと履歴の集計を表示
    Analytics {
        /// このセッションだけ使う参照ファイル
        #[arg(short, long)]
        reference: Option<PathBuf>,

        /// 参照ファイル内の医薬品名の列
        #[arg(long)]
        reference_column: Option<String>,
    },

    /// 使用中の参照データを表示
    Reference {
        /// このセッションだけ使う参照ファイル
        #[arg(short, long)]
        reference: Option<PathBuf>,

        /// 参照ファイル内の医薬品名の列
        #[arg(long)]
        reference_column: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 履歴ファイルの場所を設定
        #[arg(long)]
        set_history: Option<PathBuf>,

        /// 参照ファイルを設定（'Medicine Name' 列必須）
        #[arg(long)]
        set_reference: Option<PathBuf>,

        /// 参照ファイルの設定を解除（組み込みリストに戻す）
        #[arg(long)]
        clear_reference: bool,
    },
}
