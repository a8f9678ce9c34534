//! tracing初期化

use tracing_subscriber::EnvFilter;

/// `-v` 指定時のフィルタ
const VERBOSE_FILTER: &str = "medcheck=debug,medcheck_common=debug";

/// ログ出力を初期化する（標準エラーへ）
///
/// RUST_LOG > `-v` > 設定ファイルの順で採用する。
pub fn init(verbose: bool, default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(VERBOSE_FILTER)
        } else {
            EnvFilter::new(default_filter)
        }
    });

    // 二重初期化（テスト等）は無視
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
