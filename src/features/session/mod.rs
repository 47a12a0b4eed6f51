/// セッション機能モジュール
///
/// ログイン済み利用者のセッションコンテキストと画面ルート定数を提供します。
/// 認証処理そのものはホスト側の責務であり、このモジュールは認証結果の
/// 受け渡しのみを扱います。
// サブモジュールの宣言
pub mod models;

// 公開インターフェース
pub use models::{SessionContext, UserType, BILLS_ROUTE, NEW_BILL_ROUTE};
