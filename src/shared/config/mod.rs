/// 共有設定管理モジュール
// サブモジュールの宣言
pub mod environment;

// 公開インターフェース
pub use environment::{
    get_environment, initialize_logging_system, load_environment_variables, ApiConfig,
    Environment, EnvironmentConfig,
};
