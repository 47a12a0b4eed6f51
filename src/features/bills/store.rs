//! 請求書ストアとの通信
//!
//! リモートドキュメントストアへの一覧取得・作成・領収書アップロードを提供します。
//! コントローラーはこのトレイト越しにのみ永続化へアクセスします。

use crate::features::bills::models::{Bill, CreateBillDto};
use crate::features::bills::validation;
use crate::shared::api_client::ApiClient;
use crate::shared::config::environment::ApiConfig;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};

/// 請求書の永続化コラボレーター
///
/// リモートドキュメントストアの抽象。一覧取得（get）と作成（create）、
/// および領収書アップロードの各操作を提供する。
#[async_trait]
pub trait BillStore: Send + Sync {
    /// 請求書一覧を取得する
    async fn bills(&self) -> AppResult<Vec<Bill>>;

    /// 請求書を作成する
    async fn create_bill(&self, dto: CreateBillDto) -> AppResult<Bill>;

    /// 領収書をアップロードし、保存先URLを取得する
    async fn upload_receipt(&self, file_name: &str, data: Vec<u8>) -> AppResult<String>;
}

/// ストアからの請求書一覧レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct GetBillsResponse {
    pub data: Vec<Bill>,
}

/// ストアからの請求書作成レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBillResponse {
    pub success: bool,
    pub bill: Bill,
    pub timestamp: String,
}

/// ストアからの領収書アップロードレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadReceiptResponse {
    pub success: bool,
    #[serde(rename = "fileUrl")]
    pub file_url: Option<String>,
    #[serde(rename = "fileKey")]
    pub file_key: String,
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: String,
}

/// APIサーバー経由の請求書ストア
pub struct ApiBillStore {
    api_client: ApiClient,
}

impl ApiBillStore {
    /// 環境変数の設定で新しいストアを作成
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            api_client: ApiClient::new()?,
        })
    }

    /// 設定を指定してストアを作成
    pub fn with_config(config: ApiConfig) -> AppResult<Self> {
        Ok(Self {
            api_client: ApiClient::with_config(config)?,
        })
    }

    /// ファイルキーを生成（予測困難にする）
    fn generate_file_key(file_name: &str) -> String {
        let timestamp = chrono::Utc::now().timestamp();
        let uuid = uuid::Uuid::new_v4();
        format!("receipts/{timestamp}-{uuid}-{file_name}")
    }
}

#[async_trait]
impl BillStore for ApiBillStore {
    async fn bills(&self) -> AppResult<Vec<Bill>> {
        let response: GetBillsResponse = self.api_client.get("/api/v1/bills").await?;

        info!("請求書一覧取得成功: count={}", response.data.len());
        Ok(response.data)
    }

    async fn create_bill(&self, dto: CreateBillDto) -> AppResult<Bill> {
        let response: CreateBillResponse = self.api_client.post("/api/v1/bills", &dto).await?;

        info!("請求書作成成功: bill_id={}", response.bill.id);
        Ok(response.bill)
    }

    async fn upload_receipt(&self, file_name: &str, data: Vec<u8>) -> AppResult<String> {
        // ストア境界でもファイル形式を検証する
        validation::validate_receipt_format(file_name)?;

        let file_key = Self::generate_file_key(file_name);
        let content_type = validation::receipt_content_type(file_name);

        let response: UploadReceiptResponse = self
            .api_client
            .post_file(
                "/api/v1/receipts/upload",
                file_name,
                content_type,
                data,
                &[("fileKey", file_key)],
            )
            .await?;

        let file_url = response.file_url.ok_or_else(|| {
            AppError::external_service("アップロードレスポンスにファイルURLがありません")
        })?;

        // 返却されたURLの妥当性を確認する
        url::Url::parse(&file_url).map_err(|e| {
            AppError::external_service(format!("不正なファイルURLが返されました: {e}"))
        })?;

        info!("領収書アップロード成功: file_name={file_name}, url={file_url}");
        Ok(file_url)
    }
}
