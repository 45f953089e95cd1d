/// Parse a provider display duration such as `"1 hour 5 mins"` into whole
/// minutes.
///
/// The text is read as `<N> <unit>` pairs where the unit starts with `day`,
/// `hour` or `min`. Unknown pairs are skipped. Returns `None` when nothing
/// recognizable was found.
pub fn parse_duration_minutes(text: &str) -> Option<u32> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut total: u32 = 0;
    let mut matched = false;

    for pair in tokens.windows(2) {
        let Ok(value) = pair[0].parse::<u32>() else {
            continue;
        };
        let unit = pair[1].to_lowercase();
        let factor = if unit.starts_with("day") {
            24 * 60
        } else if unit.starts_with("hour") {
            60
        } else if unit.starts_with("min") {
            1
        } else {
            continue;
        };
        total = total.saturating_add(value.saturating_mul(factor));
        matched = true;
    }

    matched.then_some(total)
}
