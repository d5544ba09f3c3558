/// Build a [`RegexTable`](crate::RegexTable) from `pattern => value` pairs.
///
/// Start-anchored by default; lead with `anchor: (start, end);` to choose.
/// Evaluates to `Result<RegexTable<_>, Error>` from
/// [`RegexTableBuilder::build`](crate::RegexTableBuilder::build).
///
/// ```
/// let mut table = regextable::regex_table! {
///     anchor: (true, true);
///     r"\d+" => "number",
///     r"[a-z]+" => "word",
/// }
/// .unwrap();
///
/// assert_eq!(*table.lookup("abc").unwrap().0, "word");
/// ```
#[macro_export]
macro_rules! regex_table {
    (anchor: ($start:expr, $end:expr); $($pat:expr => $val:expr),* $(,)?) => {
        $crate::RegexTableBuilder::new()
            $(.add_pattern($pat, $val))*
            .build($start, $end)
    };
    ($($pat:expr => $val:expr),* $(,)?) => {
        $crate::regex_table!(anchor: (true, false); $($pat => $val),*)
    };
}
