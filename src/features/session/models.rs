use crate::shared::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// 請求書一覧画面のルート識別子
pub const BILLS_ROUTE: &str = "#employee/bills";

/// 新規請求書フォーム画面のルート識別子
pub const NEW_BILL_ROUTE: &str = "#employee/bill/new";

/// 利用者区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

/// セッションコンテキスト
///
/// ログイン済み利用者の情報。ホスト側のセッションストレージから構築され、
/// コントローラーへ明示的に渡される（グローバル状態からは読み取らない）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    /// 利用者区分
    #[serde(rename = "type")]
    pub user_type: UserType,
    /// 利用者のメールアドレス（提出者の識別子）
    pub email: String,
}

impl SessionContext {
    /// 従業員セッションを作成する
    ///
    /// # 引数
    /// * `email` - 利用者のメールアドレス
    ///
    /// # 戻り値
    /// 従業員区分のセッションコンテキスト
    pub fn employee<S: Into<String>>(email: S) -> Self {
        Self {
            user_type: UserType::Employee,
            email: email.into(),
        }
    }

    /// ホスト側に保存された利用者JSONからセッションを構築する
    ///
    /// # 引数
    /// * `raw` - 保存された利用者情報のJSON文字列（例: `{"type":"Employee","email":"a@a"}`）
    ///
    /// # 戻り値
    /// セッションコンテキスト、または解析失敗時はエラー
    pub fn from_json(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| AppError::validation(format!("セッション情報の解析に失敗しました: {e}")))
    }

    /// 従業員セッションかどうかを判定
    ///
    /// # 戻り値
    /// 従業員の場合はtrue
    pub fn is_employee(&self) -> bool {
        self.user_type == UserType::Employee
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_json() {
        // 保存された利用者JSONからの構築テスト
        let raw = r#"{"type":"Employee","email":"employee@test.tld"}"#;
        let session = SessionContext::from_json(raw).unwrap();

        assert_eq!(session.user_type, UserType::Employee);
        assert_eq!(session.email, "employee@test.tld");
        assert!(session.is_employee());
    }

    #[test]
    fn test_session_from_invalid_json() {
        // 不正なJSONはバリデーションエラーになる
        let result = SessionContext::from_json("not json");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[test]
    fn test_admin_session() {
        let raw = r#"{"type":"Admin","email":"admin@test.tld"}"#;
        let session = SessionContext::from_json(raw).unwrap();

        assert_eq!(session.user_type, UserType::Admin);
        assert!(!session.is_employee());
    }

    #[test]
    fn test_session_serialization() {
        // セッションのシリアライゼーションテスト（"type"キーで書き出される）
        let session = SessionContext::employee("a@a");
        let json = serde_json::to_string(&session).unwrap();

        assert!(json.contains("\"type\":\"Employee\""));
        assert!(json.contains("\"email\":\"a@a\""));
    }
}
