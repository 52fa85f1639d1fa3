//! Plain-text rendering of catalog state.

use catalog::controller::ProductDetail;
use catalog::product_page;
use catalog::{NoticeLevel, Notification};
use store::Product;

/// `5250` → `"5,250"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn product_row(product: &Product, assigned: bool) -> String {
    format!(
        "{} {:>4}  {}  [{}]  {} records",
        if assigned { "*" } else { " " },
        product.id,
        product.name,
        product.data_category,
        group_thousands(product.record_count)
    )
}

pub fn product_card(product: &Product) -> String {
    let mut out = format!(
        "{}\n{} • {} records\n\n{}\n",
        product.name,
        product.data_category,
        group_thousands(product.record_count),
        product_page::description(product)
    );
    if !product.fields.is_empty() {
        out.push_str("\nFields\n");
        for field in &product.fields {
            out.push_str(&format!("  • {field}\n"));
        }
    }
    out
}

pub fn detail(detail: &ProductDetail, assigned: bool) -> String {
    let mut out = product_card(&detail.product);
    out.push_str(if assigned {
        "\nIn your catalog\n"
    } else {
        "\nNot in your catalog\n"
    });
    if detail.stale {
        out.push_str("(cached data, may be outdated)\n");
    }
    out
}

pub fn print_notifications(notifications: Vec<Notification>) {
    for n in notifications {
        match n.level {
            NoticeLevel::Error => eprintln!("error: {}", n.message),
            NoticeLevel::Warning => eprintln!("warning: {}", n.message),
            NoticeLevel::Success | NoticeLevel::Info => println!("{}", n.message),
        }
    }
}
