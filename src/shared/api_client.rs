//! 汎用APIクライアント
//!
//! リモートドキュメントストアのAPIサーバーと通信する汎用的なクライアント。
//! 請求書の一覧取得・作成、領収書アップロードの各エンドポイントで使用される。

use crate::shared::config::environment::ApiConfig;
use crate::shared::errors::AppError;
use log::{debug, info, warn};
use reqwest::{multipart, Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

/// APIサーバーからのエラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
    pub timestamp: String,
}

/// 汎用APIクライアント
#[derive(Debug)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// 環境変数の設定で新しいAPIクライアントを作成
    pub fn new() -> Result<Self, AppError> {
        Self::with_config(ApiConfig::from_env())
    }

    /// 設定を指定してAPIクライアントを作成
    pub fn with_config(config: ApiConfig) -> Result<Self, AppError> {
        config.validate().map_err(AppError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client, config })
    }

    /// GETリクエストを送信
    pub async fn get<T>(&self, endpoint: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        debug!("GETリクエスト送信: endpoint={endpoint}");

        let url = format!("{}{endpoint}", self.config.base_url);
        let request = self.client.get(&url);

        self.send_request_with_retry(request, "GET", endpoint).await
    }

    /// POSTリクエストを送信
    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        debug!("POSTリクエスト送信: endpoint={endpoint}");

        let url = format!("{}{endpoint}", self.config.base_url);
        let request = self.client.post(&url).json(body);

        self.send_request_with_retry(request, "POST", endpoint)
            .await
    }

    /// ファイルをマルチパートフォームで送信
    ///
    /// # 引数
    /// * `endpoint` - アップロード先エンドポイント
    /// * `file_name` - 元のファイル名
    /// * `content_type` - ファイルのMIMEタイプ
    /// * `data` - ファイルデータ
    /// * `fields` - 追加のテキストフィールド
    ///
    /// # 戻り値
    /// デシリアライズされたレスポンス、または失敗時はエラー
    pub async fn post_file<T>(
        &self,
        endpoint: &str,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
        fields: &[(&str, String)],
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        info!("ファイルアップロード開始: endpoint={endpoint}, file_name={file_name}");

        let url = format!("{}{endpoint}", self.config.base_url);

        // リトライ機能付きでリクエスト送信
        let mut attempts = 0;
        loop {
            // マルチパートフォームデータを構築（リトライごとに再作成）
            let mut form = multipart::Form::new().part(
                "file",
                multipart::Part::bytes(data.clone())
                    .file_name(file_name.to_string())
                    .mime_str(content_type)
                    .map_err(|e| AppError::validation(format!("MIMEタイプ設定エラー: {e}")))?,
            );

            for (name, value) in fields {
                form = form.text(name.to_string(), value.clone());
            }

            match self.client.post(&url).multipart(form).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        let result: T = response.json().await.map_err(|e| {
                            AppError::ExternalService(format!("レスポンス解析エラー: {e}"))
                        })?;

                        info!("ファイルアップロード成功: file_name={file_name}");
                        return Ok(result);
                    } else {
                        return Err(self.error_from_response(response).await);
                    }
                }
                Err(e) => {
                    if attempts < self.config.max_retries {
                        attempts += 1;
                        let delay = Duration::from_secs(2_u64.pow(attempts));
                        warn!(
                            "APIリクエスト失敗、リトライします: attempt={attempts}/{}, delay={delay:?}",
                            self.config.max_retries
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    } else {
                        return Err(AppError::ExternalService(format!(
                            "APIサーバーへの接続に失敗しました: {e}"
                        )));
                    }
                }
            }
        }
    }

    /// リトライ機能付きでリクエストを送信
    async fn send_request_with_retry<T>(
        &self,
        request: reqwest::RequestBuilder,
        method: &str,
        endpoint: &str,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let mut attempts = 0;
        loop {
            match request.try_clone() {
                Some(cloned_request) => match cloned_request.send().await {
                    Ok(response) => {
                        if response.status().is_success() {
                            let result: T = response.json().await.map_err(|e| {
                                AppError::ExternalService(format!("レスポンス解析エラー: {e}"))
                            })?;

                            debug!("{method}リクエスト成功: endpoint={endpoint}");
                            return Ok(result);
                        } else {
                            return Err(self.error_from_response(response).await);
                        }
                    }
                    Err(e) => {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            let delay = Duration::from_secs(2_u64.pow(attempts));
                            warn!(
                                "APIリクエスト失敗、リトライします: attempt={attempts}/{}, delay={delay:?}",
                                self.config.max_retries
                            );
                            tokio::time::sleep(delay).await;
                            continue;
                        } else {
                            return Err(AppError::ExternalService(format!(
                                "APIサーバーへの接続に失敗しました: {e}"
                            )));
                        }
                    }
                },
                None => {
                    return Err(AppError::ExternalService(
                        "リクエストのクローンに失敗しました".to_string(),
                    ));
                }
            }
        }
    }

    /// エラーレスポンスをAppErrorに変換する
    ///
    /// ストアが返す人間可読のエラーメッセージ形式（"Erreur 404 : Not Found" など）
    /// をそのまま呼び出し側に届ける。
    async fn error_from_response(&self, response: Response) -> AppError {
        let status = response.status();
        let reason = status
            .canonical_reason()
            .unwrap_or("Unknown Error")
            .to_string();

        let response_text = response.text().await.unwrap_or_default();

        // 構造化エラーレスポンスの解析を試行
        let message = match serde_json::from_str::<ErrorResponse>(&response_text) {
            Ok(error_response) => {
                debug!(
                    "APIサーバーから構造化エラーレスポンスを受信: code={}, message={}",
                    error_response.error.code, error_response.error.message
                );
                error_response.error.message
            }
            Err(_) => {
                warn!(
                    "APIサーバーから非構造化エラーレスポンス: status={}, body={response_text}",
                    status.as_u16()
                );
                reason
            }
        };

        AppError::ExternalService(format!("Erreur {} : {message}", status.as_u16()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_deserialization() {
        // 構造化エラーレスポンスのデシリアライゼーションテスト
        let json = r#"{
            "error": {
                "code": "NOT_FOUND",
                "message": "Not Found",
                "details": null,
                "timestamp": "2024-01-01T00:00:00Z"
            }
        }"#;

        let response: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.error.code, "NOT_FOUND");
        assert_eq!(response.error.message, "Not Found");
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        // 無効な設定ではクライアントを作成できない
        let config = ApiConfig {
            base_url: String::new(),
            ..ApiConfig::default()
        };

        let result = ApiClient::with_config(config);
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Configuration(_)));
    }
}
