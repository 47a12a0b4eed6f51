//! 経費精算書（note de frais）提出機能
//!
//! 従業員が領収書付きの経費精算書を作成・提出するためのライブラリです。
//! フォームコントローラー、領収書ファイルの検証、リモートドキュメントストア
//! との通信、一覧画面のレンダリングを提供します。

// 機能モジュール構造
pub mod features;
pub mod shared;

// よく使う型の再エクスポート
pub use features::bills::{Bill, BillStatus, CreateBillDto, NewBillForm};
pub use features::session::{SessionContext, UserType};
pub use shared::errors::{AppError, AppResult};
