//! 新規請求書フォームコントローラー
//!
//! レンダリング済みフォームと永続化コラボレーターの仲介役。
//! ファイル選択イベントの検証と、送信イベントでの請求書作成を担当します。

use crate::features::bills::models::{Bill, BillStatus, CreateBillDto};
use crate::features::bills::store::BillStore;
use crate::features::bills::validation;
use crate::features::session::{SessionContext, BILLS_ROUTE};
use crate::shared::errors::{AppError, AppResult};
use log::{error, info, warn};
use std::sync::Arc;

/// フォームフィールドの識別子
pub const FIELD_EXPENSE_NAME: &str = "expense-name";
pub const FIELD_DATEPICKER: &str = "datepicker";
pub const FIELD_EXPENSE_TYPE: &str = "expense-type";
pub const FIELD_AMOUNT: &str = "amount";
pub const FIELD_VAT: &str = "vat";
pub const FIELD_PCT: &str = "pct";
pub const FIELD_COMMENTARY: &str = "commentary";

/// pctが未入力・不正な場合のデフォルト値
const DEFAULT_PCT: u32 = 20;

/// レンダリング済みフォームの読み取りインターフェース
///
/// コントローラー自身は描画環境を直接参照せず、このトレイト越しに
/// フィールド値の読み取りとエラー表示の切り替えを行う。
pub trait NewBillView {
    /// フィールドの現在値を読み取る
    fn read(&self, field_id: &str) -> String;

    /// ファイル形式エラー表示の可視状態を設定する
    fn set_format_error_visible(&mut self, visible: bool);
}

/// ナビゲーションコラボレーター
pub trait Navigator: Send + Sync {
    /// 指定ルートへ遷移する
    fn navigate(&self, route: &str);
}

/// ファイル選択イベントのペイロード
#[derive(Debug, Clone)]
pub struct FileInput {
    /// 選択されたファイルの名前
    pub file_name: String,
    /// ファイルデータ
    pub data: Vec<u8>,
}

/// フォーム送信イベント
///
/// ネイティブのフォーム送信（ページ遷移）を抑止したかどうかを記録する。
#[derive(Debug, Default)]
pub struct SubmitEvent {
    prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// デフォルトの送信動作を抑止する
    pub fn prevent_default(&mut self) {
        self.prevented = true;
    }

    /// デフォルト動作が抑止されたかどうか
    pub fn default_prevented(&self) -> bool {
        self.prevented
    }
}

/// 検証済みの添付領収書
#[derive(Debug, Clone)]
struct AttachedReceipt {
    file_name: String,
    data: Vec<u8>,
}

/// 新規請求書フォームコントローラー
pub struct NewBillForm {
    /// セッションコンテキスト（提出者の識別に使用）
    session: SessionContext,
    /// 永続化コラボレーター
    store: Arc<dyn BillStore>,
    /// 作成成功後の遷移先を扱うナビゲーター
    navigator: Arc<dyn Navigator>,
    /// 検証済みの添付領収書（未添付の場合はNone）
    attachment: Option<AttachedReceipt>,
}

impl NewBillForm {
    /// 新しいコントローラーを作成する
    ///
    /// # 引数
    /// * `session` - セッションコンテキスト
    /// * `store` - 永続化コラボレーター
    /// * `navigator` - ナビゲーションコラボレーター
    ///
    /// # 戻り値
    /// コントローラーインスタンス（添付なしの初期状態）
    pub fn new(
        session: SessionContext,
        store: Arc<dyn BillStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            session,
            store,
            navigator,
            attachment: None,
        }
    }

    /// ファイル選択イベントを処理する
    ///
    /// 拡張子を許可リスト（jpg/jpeg/png、大文字小文字区別なし）と照合する。
    /// 受理した場合はファイルを送信用に保持してエラー表示を隠し、
    /// 拒否した場合はエラー表示を出して保持中のファイルを破棄する。
    /// どちらの場合もネットワーク通信は発生しない。
    ///
    /// # 引数
    /// * `view` - フォームビュー
    /// * `file` - 選択されたファイル
    ///
    /// # 戻り値
    /// ファイルを受理した場合はtrue
    pub fn handle_change_file(&mut self, view: &mut dyn NewBillView, file: FileInput) -> bool {
        match validation::validate_receipt_format(&file.file_name) {
            Ok(()) => {
                info!("領収書ファイルを受理しました: file_name={}", file.file_name);
                view.set_format_error_visible(false);
                self.attachment = Some(AttachedReceipt {
                    file_name: file.file_name,
                    data: file.data,
                });
                true
            }
            Err(e) => {
                warn!(
                    "領収書ファイルを拒否しました: file_name={}, reason={}",
                    file.file_name,
                    e.user_message()
                );
                view.set_format_error_visible(true);
                self.attachment = None;
                false
            }
        }
    }

    /// 保持中の添付ファイル名を取得する
    ///
    /// # 戻り値
    /// 検証済み添付がある場合はそのファイル名
    pub fn attachment_file_name(&self) -> Option<&str> {
        self.attachment.as_ref().map(|a| a.file_name.as_str())
    }

    /// フォーム送信イベントを処理する
    ///
    /// # 処理内容
    /// 1. ネイティブのフォーム送信を抑止する
    /// 2. 検証済み添付の存在を確認する（未添付の送信は受け付けない）
    /// 3. 領収書をアップロードしてファイルURLを取得する
    /// 4. フォームの各フィールドを読み取り、請求書レコードを組み立てる
    /// 5. ストアのcreate操作を呼び出し、成功時は一覧画面へ遷移する
    ///
    /// # 引数
    /// * `event` - 送信イベント
    /// * `view` - フォームビュー
    ///
    /// # 戻り値
    /// 作成された請求書、または失敗時はエラー
    pub async fn handle_submit(
        &mut self,
        event: &mut SubmitEvent,
        view: &dyn NewBillView,
    ) -> AppResult<Bill> {
        event.prevent_default();

        // 検証済み添付がなければ送信を受け付けない
        let attachment = self
            .attachment
            .clone()
            .ok_or_else(|| AppError::validation("領収書が添付されていません"))?;

        // 領収書をアップロードしてURLを取得する
        let file_url = match self
            .store
            .upload_receipt(&attachment.file_name, attachment.data)
            .await
        {
            Ok(url) => url,
            Err(e) => {
                error!("領収書のアップロードに失敗しました: {e}");
                return Err(e);
            }
        };

        let dto = self.read_bill(view, file_url, attachment.file_name);

        match self.store.create_bill(dto).await {
            Ok(bill) => {
                info!("請求書を作成しました: bill_id={}", bill.id);
                self.navigator.navigate(BILLS_ROUTE);
                Ok(bill)
            }
            Err(e) => {
                // 失敗はログに残して呼び出し側へ返す。リトライはしない
                error!("請求書の作成に失敗しました: {e}");
                Err(e)
            }
        }
    }

    /// フォームの現在値から作成用DTOを組み立てる
    fn read_bill(
        &self,
        view: &dyn NewBillView,
        file_url: String,
        file_name: String,
    ) -> CreateBillDto {
        let amount = view.read(FIELD_AMOUNT).parse::<f64>().unwrap_or(0.0);
        let pct = view.read(FIELD_PCT).parse::<u32>().unwrap_or(DEFAULT_PCT);

        let commentary_raw = view.read(FIELD_COMMENTARY);
        let commentary = if commentary_raw.trim().is_empty() {
            None
        } else {
            Some(commentary_raw)
        };

        CreateBillDto {
            name: view.read(FIELD_EXPENSE_NAME),
            date: view.read(FIELD_DATEPICKER),
            bill_type: view.read(FIELD_EXPENSE_TYPE),
            amount,
            vat: view.read(FIELD_VAT),
            pct,
            commentary,
            file_url,
            file_name,
            status: BillStatus::Pending,
            email: self.session.email.clone(),
        }
    }
}
