//! Built-in suite exercising the bundled helpers through the harness.
//!
//! Run with `duallog selfcheck`. It doubles as a worked example of writing
//! units: plain functions named `test_*`, registered with
//! [`candidates!`](crate::candidates).

use std::fs;

use crate::backup::backup_file;
use crate::console::{wrap, WrapOptions};
use crate::format::{currency_symbol, format_currency, format_percent, CurrencyStyle};
use crate::model::WarningOrigin;
use crate::recorder::TestContext;
use crate::registry::{Candidate, UnitResult};

/// Formats with `code`, raising a user warning when the code is not a known
/// ISO currency and the text is used verbatim.
fn currency_with_notice(ctx: &mut TestContext, amount: f64, digits: i32, code: &str) -> Option<String> {
    if currency_symbol(code).is_none() {
        ctx.warn(
            WarningOrigin::User,
            format!("unknown currency code '{code}', using it as the symbol"),
        );
    }
    format_currency(amount, digits, &CurrencyStyle::code(code))
}

fn test_currency_formatting(ctx: &mut TestContext) -> UnitResult {
    let usd = CurrencyStyle::default();

    ctx.open_label("Rounding");
    ctx.record_with_snippet(
        Some("$1,234.57".to_string()),
        format_currency(1234.567, 2, &usd),
        "two decimal places",
        "format_currency(1234.567, 2, &usd)",
    );
    ctx.record(
        Some("$12,300".to_string()),
        format_currency(12345.67, -2, &usd),
        "negative digits round to hundreds",
    );
    ctx.record(
        vec![Some("$6".to_string()), Some("$2".to_string())],
        [5.5, 2.5]
            .iter()
            .map(|v| format_currency(*v, 0, &usd))
            .collect::<Vec<_>>(),
        "halves round to even",
    );

    ctx.open_label("Symbols");
    ctx.record(
        Some("-€9,877".to_string()),
        format_currency(-9876.543, 0, &CurrencyStyle::code("EUR")),
        "ISO code maps to symbol, sign first",
    );
    ctx.record(
        Some("€1.234,50".to_string()),
        format_currency(1234.5, 2, &CurrencyStyle::code("EUR").euro()),
        "euro style separators",
    );
    Ok(())
}

fn test_percent_formatting(ctx: &mut TestContext) -> UnitResult {
    ctx.open_label("Percentages");
    let cases = [
        (0.1234, 2, "12.34%"),
        (0.9876, 1, "98.8%"),
        (-0.12345, 1, "-12.3%"),
        (0.12345, -1, "10%"),
        (0.6789, -2, "100%"),
    ];
    for (value, digits, expected) in cases {
        ctx.record(
            Some(expected.to_string()),
            format_percent(value, digits),
            format!("{value} at {digits} digits"),
        );
    }
    ctx.record(None, format_percent(f64::NAN, 1), "NaN is not formatted");
    Ok(())
}

fn test_unknown_currency_warns(ctx: &mut TestContext) -> UnitResult {
    ctx.open_label("Unknown codes");
    let mut formatted = None;
    ctx.record_expected_warning(
        |ctx| formatted = currency_with_notice(ctx, 10.0, 0, "BTC"),
        WarningOrigin::User,
    );
    ctx.record(Some("BTC10".to_string()), formatted, "code used verbatim");
    Ok(())
}

fn test_console_wrapping(ctx: &mut TestContext) -> UnitResult {
    ctx.open_label("Wrapping");
    let options = WrapOptions {
        width: 12,
        indent: "* ".to_string(),
        subsequent_indent: "  ".to_string(),
    };
    let lines = wrap("dual pass reports stay apart", &options);
    for line in &lines {
        ctx.print(line);
    }
    ctx.record(
        vec!["* dual pass", "  reports", "  stay apart"],
        lines.iter().map(String::as_str).collect::<Vec<_>>(),
        "greedy wrap with hanging indent",
    );
    Ok(())
}

fn test_backup_retention(ctx: &mut TestContext) -> UnitResult {
    ctx.open_label("Backups");
    let dir = std::env::temp_dir().join(format!("duallog-selfcheck-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir)?;
    let source = dir.join("ledger.csv");
    fs::write(&source, "id,amount\n1,10\n")?;
    let prefix = dir.join("backups").join("ledger");

    let mut last = None;
    for _ in 0..4 {
        last = Some(backup_file(&source, &prefix, "v1", 2)?);
    }
    let kept = fs::read_dir(dir.join("backups"))?.count();
    ctx.record(2, kept, "only the newest two backups are kept");
    let newest = last
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_default();
    ctx.record("ledger_v1_0004.csv".to_string(), newest, "newest backup name");

    fs::remove_dir_all(&dir)?;
    Ok(())
}

/// The self-check units in declaration order.
pub fn candidates() -> Vec<Candidate> {
    crate::candidates![
        test_currency_formatting => "currency rounding, grouping and symbols",
        test_percent_formatting => "percentage rounding",
        test_unknown_currency_warns => "unknown ISO codes raise a user warning",
        test_console_wrapping => "console line wrapping",
        test_backup_retention => "backup copies are pruned to the retention count",
    ]
}
