/// 請求書（note de frais）機能モジュール
///
/// 新規請求書フォームのコントローラー、領収書ファイルの検証、
/// 永続化ストア、一覧画面のレンダリングを提供します。
// サブモジュールの宣言
pub mod form;
pub mod models;
pub mod store;
pub mod ui;
pub mod validation;

// 公開インターフェース
pub use form::{FileInput, Navigator, NewBillForm, NewBillView, SubmitEvent};
pub use models::{is_known_expense_type, Bill, BillStatus, CreateBillDto, EXPENSE_TYPES};
pub use store::{ApiBillStore, BillStore};
pub use ui::BillsView;
pub use validation::{receipt_content_type, validate_receipt_format};
