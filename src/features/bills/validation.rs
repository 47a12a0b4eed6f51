use crate::shared::errors::{AppError, AppResult};

/// 領収書として受け付ける拡張子の許可リスト
const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// 領収書のファイル形式を検証する
///
/// 拡張子（ファイル名の最後の`.`以降）を小文字化して許可リストと比較する。
///
/// # 引数
/// * `file_name` - 選択されたファイルの名前
///
/// # 戻り値
/// 受け付け可能な形式の場合はOk(())、それ以外はバリデーションエラー
pub fn validate_receipt_format(file_name: &str) -> AppResult<()> {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .ok_or_else(|| AppError::validation("ファイル拡張子が取得できません"))?;

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::validation(
            "サポートされていないファイル形式です（JPG、JPEG、PNGのみ対応）",
        ));
    }

    Ok(())
}

/// ファイル名からContent-Typeを推定する
///
/// # 引数
/// * `file_name` - ファイル名
///
/// # 戻り値
/// 対応するMIMEタイプ（未知の拡張子はapplication/octet-stream）
pub fn receipt_content_type(file_name: &str) -> &'static str {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_validate_receipt_format_accepts_images() {
        assert!(validate_receipt_format("test.jpg").is_ok());
        assert!(validate_receipt_format("test.jpeg").is_ok());
        assert!(validate_receipt_format("test.png").is_ok());
    }

    #[test]
    fn test_validate_receipt_format_is_case_insensitive() {
        // 大文字小文字を区別せずに判定する
        assert!(validate_receipt_format("facture.JPG").is_ok());
        assert!(validate_receipt_format("facture.Png").is_ok());
        assert!(validate_receipt_format("facture.JPEG").is_ok());
    }

    #[test]
    fn test_validate_receipt_format_rejects_other_formats() {
        assert!(validate_receipt_format("sample.txt").is_err());
        assert!(validate_receipt_format("receipt.pdf").is_err());
        assert!(validate_receipt_format("archive.tar.gz").is_err());
    }

    #[test]
    fn test_validate_receipt_format_rejects_missing_extension() {
        // 拡張子なしは受け付けない
        let result = validate_receipt_format("sample");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[test]
    fn test_receipt_content_type() {
        assert_eq!(receipt_content_type("test.png"), "image/png");
        assert_eq!(receipt_content_type("test.jpg"), "image/jpeg");
        assert_eq!(receipt_content_type("test.JPEG"), "image/jpeg");
        assert_eq!(
            receipt_content_type("test.txt"),
            "application/octet-stream"
        );
    }

    /// 許可リスト内の拡張子を持つファイル名は常に受理される
    #[quickcheck]
    fn prop_allowed_extensions_are_accepted(stem: String, ext_index: usize, uppercase: bool) -> bool {
        // ファイル名として安全なステムに正規化する
        let stem: String = stem.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        let stem = if stem.is_empty() {
            "receipt".to_string()
        } else {
            stem
        };

        let ext = ALLOWED_EXTENSIONS[ext_index % ALLOWED_EXTENSIONS.len()];
        let ext = if uppercase {
            ext.to_uppercase()
        } else {
            ext.to_string()
        };

        validate_receipt_format(&format!("{stem}.{ext}")).is_ok()
    }

    /// 許可リスト外の拡張子を持つファイル名は常に拒否される
    #[quickcheck]
    fn prop_foreign_extensions_are_rejected(ext: String) -> TestResult {
        let ext: String = ext.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        if ext.is_empty() || ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
            return TestResult::discard();
        }

        TestResult::from_bool(validate_receipt_format(&format!("sample.{ext}")).is_err())
    }
}
