//! Plain-text rendering of directory views.

use std::io::{self, Write};

use directory_core::{
    notify::{CONFIRM_DELETE_DESCRIPTION, CONFIRM_DELETE_TITLE},
    RowAction,
};
use shared::{
    domain::{ClientId, ClientRecord},
    protocol::{DirectorySnapshot, Toast, EMPTY_DIRECTORY_MESSAGE},
};

const HEADERS: [&str; 5] = ["Name", "Email", "Phone", "Company", "Total Invoiced"];

pub fn write_table(out: &mut impl Write, snapshot: &DirectorySnapshot) -> io::Result<()> {
    if snapshot.is_empty() {
        return writeln!(out, "{EMPTY_DIRECTORY_MESSAGE}");
    }

    let cells: Vec<[String; 5]> = snapshot
        .rows
        .iter()
        .map(|row| {
            [
                row.record.name.clone(),
                row.record.email.clone(),
                row.record.phone.clone(),
                row.record.company.clone(),
                format!("{} ({})", row.total_billed_display, row.invoices_label),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_line(out, &HEADERS.map(String::from), &widths)?;
    for row in &cells {
        write_line(out, row, &widths)?;
    }

    if let Some(footer) = snapshot.footer() {
        writeln!(out, "{footer}")?;
    }
    Ok(())
}

fn write_line(out: &mut impl Write, cells: &[String; 5], widths: &[usize; 5]) -> io::Result<()> {
    let [name, email, phone, company, total] = cells;
    writeln!(
        out,
        "{name:<w0$}  {email:<w1$}  {phone:<w2$}  {company:<w3$}  {total:>w4$}",
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
        w4 = widths[4],
    )
}

pub fn write_profile(out: &mut impl Write, record: &ClientRecord) -> io::Result<()> {
    writeln!(out, "{}", record.name)?;
    writeln!(out, "  id:       {}", record.id)?;
    writeln!(out, "  email:    {}", record.email)?;
    writeln!(out, "  phone:    {}", record.phone)?;
    writeln!(out, "  company:  {}", record.company)?;
    writeln!(
        out,
        "  invoiced: {} ({})",
        record.total_billed,
        record.invoices_label()
    )
}

/// The per-row menu, with the shell verb that triggers each entry.
pub fn write_row_actions(out: &mut impl Write, id: &ClientId) -> io::Result<()> {
    writeln!(out, "Actions:")?;
    for action in RowAction::ALL {
        let verb = match action {
            RowAction::ViewProfile => "open",
            RowAction::EditClient => "edit",
            RowAction::DeleteClient => "delete",
        };
        let note = if action.is_destructive() {
            "  (asks for confirmation)"
        } else {
            ""
        };
        writeln!(out, "  {:<14} {verb} {id}{note}", action.label())?;
    }
    Ok(())
}

pub fn write_confirmation(out: &mut impl Write, record: Option<&ClientRecord>) -> io::Result<()> {
    writeln!(out, "{CONFIRM_DELETE_TITLE}")?;
    writeln!(out, "{CONFIRM_DELETE_DESCRIPTION}")?;
    if let Some(record) = record {
        writeln!(out, "Client: {} <{}>", record.name, record.email)?;
    }
    writeln!(out, "Type 'confirm' to delete or 'cancel' to keep the client.")
}

pub fn write_toast(out: &mut impl Write, toast: &Toast) -> io::Result<()> {
    writeln!(out, "[{}] {}", toast.title, toast.description)
}
