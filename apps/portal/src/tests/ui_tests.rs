use super::{sorted_rows, Views, DEFAULT_PCT};

use shared::domain::ExpenseType;

use crate::{
    controller::bills::DisplayBill,
    document::{ModalImage, NavIcon},
    fixtures,
};

fn display_bills() -> Vec<DisplayBill> {
    fixtures::bills()
        .into_iter()
        .map(DisplayBill::decorate)
        .collect()
}

fn count(markup: &str, test_id: &str) -> usize {
    markup.matches(&format!("data-testid=\"{test_id}\"")).count()
}

#[test]
fn rows_are_ordered_latest_first() {
    let rows = sorted_rows(&display_bills());
    let keys: Vec<&str> = rows.iter().map(|row| row.sort_key.as_str()).collect();
    assert_eq!(keys, ["2004-04-04", "2003-03-03", "2002-02-02", "2001-01-01"]);
    assert_eq!(rows[0].display_date, "4 Avr. 04");
    assert_eq!(rows[0].status_label, "En attente");
}

#[test]
fn malformed_date_is_shown_raw() {
    let mut bill = fixtures::bills().remove(0);
    bill.date = "sometime".into();
    let rows = sorted_rows(&[DisplayBill::decorate(bill)]);
    assert_eq!(rows[0].display_date, "sometime");
    assert_eq!(rows[0].sort_key, "sometime");
}

#[test]
fn bills_view_renders_one_row_per_bill() {
    let views = Views::new().expect("templates");
    let markup = views.bills(&sorted_rows(&display_bills())).expect("render");

    assert_eq!(count(&markup, "tbody"), 1);
    assert_eq!(count(&markup, "icon-eye"), 4);
    assert_eq!(count(&markup, "btn-new-bill"), 1);
    assert!(markup.contains("Mes notes de frais"));
    assert!(markup.contains("4 Avr. 04"));
    assert!(markup.contains("Hôtel et logement"));
    assert!(!markup.contains("modaleFile"));
}

#[test]
fn bills_view_marks_window_icon_active() {
    let views = Views::new().expect("templates");
    let markup = views.bills(&[]).expect("render");

    assert!(markup.contains(r#"data-testid="icon-window" class="active-icon""#));
    assert!(markup.contains(r#"data-testid="icon-mail" class="""#));
    assert_eq!(count(&markup, "icon-eye"), 0);
    assert_eq!(count(&markup, "tbody"), 1);
}

#[test]
fn error_view_shows_the_message() {
    let views = Views::new().expect("templates");
    let markup = views
        .error(Some(NavIcon::Window), "Erreur 404")
        .expect("render");

    assert_eq!(count(&markup, "error-message"), 1);
    assert!(markup.contains("Erreur 404"));
    assert_eq!(count(&markup, "tbody"), 0);
}

#[test]
fn loading_view_has_loading_marker() {
    let views = Views::new().expect("templates");
    let markup = views.loading(Some(NavIcon::Window)).expect("render");
    assert!(markup.contains(r#"id="loading""#));
}

#[test]
fn new_bill_view_exposes_form_hooks() {
    let views = Views::new().expect("templates");
    let markup = views.new_bill().expect("render");

    assert!(markup.contains("Envoyer une note de frais"));
    for test_id in [
        "form-new-bill",
        "expense-type",
        "expense-name",
        "datepicker",
        "amount",
        "vat",
        "pct",
        "commentary",
        "file",
    ] {
        assert_eq!(count(&markup, test_id), 1, "missing {test_id}");
    }
    assert_eq!(markup.matches("<option>").count(), ExpenseType::ALL.len());
    assert!(markup.contains(&format!("placeholder=\"{DEFAULT_PCT}\"")));
    assert!(markup.contains(r#"data-testid="icon-mail" class="active-icon""#));
}

#[test]
fn login_view_has_employee_form() {
    let views = Views::new().expect("templates");
    let markup = views.login().expect("render");

    assert_eq!(count(&markup, "form-employee"), 1);
    assert_eq!(count(&markup, "employee-email-input"), 1);
    assert_eq!(count(&markup, "employee-login-button"), 1);
}

#[test]
fn modal_view_sizes_the_image() {
    let views = Views::new().expect("templates");
    let markup = views
        .modal(&ModalImage {
            src: "receipt.png".into(),
            width: 400,
        })
        .expect("render");

    assert!(markup.contains(r#"id="modaleFile""#));
    assert!(markup.contains(r#"width="400""#));
    assert!(markup.contains(r#"src="receipt.png""#));
}
