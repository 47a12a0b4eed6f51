use serde::{Deserialize, Serialize};

/// 経費カテゴリの固定リスト
pub const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "Fournitures de bureau",
    "Equipement et matériel",
    "IT et électronique",
];

/// 請求書のライフサイクルステータス
///
/// 作成時は常にPending。承認者がAccepted/Refusedへ遷移させる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    /// 表示用の文字列を取得
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "Pending",
            BillStatus::Accepted => "Accepted",
            BillStatus::Refused => "Refused",
        }
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 請求書データモデル
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Bill {
    /// ストアが割り当てるドキュメントID
    pub id: String,
    pub name: String,
    /// 経費発生日（YYYY-MM-DD形式）
    pub date: String,
    /// 経費カテゴリ（EXPENSE_TYPESのいずれか）
    #[serde(rename = "type")]
    pub bill_type: String,
    pub amount: f64,
    pub vat: String,
    pub pct: u32,
    pub commentary: Option<String>,
    /// アップロード済み領収書のURL
    #[serde(rename = "fileUrl")]
    pub file_url: String,
    /// アップロードされた元のファイル名
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub status: BillStatus,
    /// 提出者のメールアドレス（セッション由来、利用者入力ではない）
    pub email: String,
}

/// 請求書作成用DTO
///
/// ストアのcreate操作に渡すペイロード。IDはストア側で割り当てられる。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBillDto {
    pub name: String,
    pub date: String,
    #[serde(rename = "type")]
    pub bill_type: String,
    pub amount: f64,
    pub vat: String,
    pub pct: u32,
    pub commentary: Option<String>,
    #[serde(rename = "fileUrl")]
    pub file_url: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub status: BillStatus,
    pub email: String,
}

/// カテゴリが既知の経費カテゴリかどうかを判定
///
/// # 引数
/// * `bill_type` - 判定するカテゴリ名
///
/// # 戻り値
/// EXPENSE_TYPESに含まれる場合はtrue
pub fn is_known_expense_type(bill_type: &str) -> bool {
    EXPENSE_TYPES.contains(&bill_type)
}
