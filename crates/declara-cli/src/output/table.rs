use declara_core::model::{OrderRecord, Party};

pub fn print(record: &OrderRecord) {
    print!("{}", format_order(record));
}

pub fn format_order(record: &OrderRecord) -> String {
    let mut out = String::new();

    if let Some(number) = &record.order_number {
        out.push_str(&format!("Order: {number}\n\n"));
    }

    out.push_str(&format_party("Sender", &record.sender));
    out.push('\n');
    out.push_str(&format_party("Recipient", &record.recipient));
    out.push('\n');

    out.push_str(&format!("  Weight: {}\n", or_dash(&record.weight)));
    out.push_str(&format!("  Date:   {}\n\n", record.declaration_date));

    if record.items.is_empty() {
        out.push_str("  No items found\n");
        return out;
    }

    let width = record
        .items
        .iter()
        .map(|item| item.quantity.len())
        .max()
        .unwrap_or(1)
        .max(3);
    out.push_str(&format!("  {:>width$}  Item\n", "Qty"));
    for item in &record.items {
        out.push_str(&format!("  {:>width$}  {}\n", item.quantity, item.name));
    }

    out
}

fn format_party(title: &str, party: &Party) -> String {
    let mut city = party.city.clone();
    if let Some(state) = party.state {
        city.push_str(&format!(" - {state}"));
    }

    format!(
        "=== {title} ===\n  Name:    {}\n  Address: {}\n  City:    {}\n  CEP:     {}\n",
        or_dash(&party.name),
        or_dash(&party.address),
        or_dash(&city),
        or_dash(&party.postal_code),
    )
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
