//! 請求書一覧画面のレンダリング
//!
//! 取得結果（成功・失敗・読み込み中）を表示用の文字列に変換します。
//! レンダリング自体は純粋関数で、ストアへのアクセスは行いません。

use crate::features::bills::models::Bill;

/// 一覧画面の表示状態
#[derive(Debug)]
pub enum BillsView<'a> {
    /// データ取得中
    Loading,
    /// 取得失敗（ストアから返されたエラーメッセージをそのまま表示する）
    Error(&'a str),
    /// 取得成功
    List(&'a [Bill]),
}

impl BillsView<'_> {
    /// 表示状態をレンダリングする
    ///
    /// # 戻り値
    /// 画面に表示するテキスト
    pub fn render(&self) -> String {
        match self {
            BillsView::Loading => "Chargement...".to_string(),
            BillsView::Error(message) => format!("Erreur\n{message}"),
            BillsView::List(bills) => render_rows(bills),
        }
    }
}

/// 請求書を1件1行で整形する
fn render_rows(bills: &[Bill]) -> String {
    bills
        .iter()
        .map(|bill| {
            format!(
                "{}\t{}\t{}\t{} €\t{}",
                bill.bill_type, bill.name, bill.date, bill.amount, bill.status
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::bills::store::test_support::fixture_bills;

    #[test]
    fn test_render_loading() {
        assert_eq!(BillsView::Loading.render(), "Chargement...");
    }

    #[test]
    fn test_render_error_shows_store_message() {
        // ストアのエラーメッセージをそのまま表示する
        let view = BillsView::Error("Erreur 404 : Not Found");
        assert!(view.render().contains("Erreur 404 : Not Found"));

        let view = BillsView::Error("Erreur 500 : Internal Server Error");
        assert!(view.render().contains("Erreur 500 : Internal Server Error"));
    }

    #[test]
    fn test_render_list_has_one_row_per_bill() {
        let bills = fixture_bills();
        let view = BillsView::List(&bills);
        let rendered = view.render();

        assert_eq!(rendered.lines().count(), bills.len());
        for bill in &bills {
            assert!(rendered.contains(&bill.name));
            assert!(rendered.contains(&bill.date));
        }
    }

    #[test]
    fn test_render_empty_list() {
        let view = BillsView::List(&[]);
        assert_eq!(view.render(), "");
    }
}
