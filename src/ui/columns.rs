/// One column of a fixed-width row table.
///
/// `min_width` and `max_width` are fractions of the available width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub label: &'static str,
    pub min_width: f32,
    pub max_width: f32,
}

impl Column {
    pub const fn new(label: &'static str, min_width: f32, max_width: f32) -> Self {
        Self {
            label,
            min_width,
            max_width,
        }
    }
}

/// Split `total` cells between `columns`.
///
/// Every column first gets its minimum share; whatever is left is handed out
/// left to right until each column reaches its maximum share.
pub fn column_widths(columns: &[Column], total: u16) -> Vec<u16> {
    let share = |fraction: f32| (fraction.clamp(0.0, 1.0) * total as f32).floor() as u16;

    let mut widths: Vec<u16> = columns.iter().map(|c| share(c.min_width)).collect();
    let used: u16 = widths.iter().fold(0u16, |acc, w| acc.saturating_add(*w));

    if used > total {
        // Minimums alone overflow: shrink from the right
        let mut excess = used - total;
        for w in widths.iter_mut().rev() {
            let cut = excess.min(*w);
            *w -= cut;
            excess -= cut;
        }
        return widths;
    }

    let mut remaining = total - used;
    for (w, column) in widths.iter_mut().zip(columns) {
        let max = share(column.max_width).max(*w);
        let grow = (max - *w).min(remaining);
        *w += grow;
        remaining -= grow;
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: [Column; 3] = [
        Column::new("A", 0.1, 0.2),
        Column::new("B", 0.1, 0.3),
        Column::new("C", 0.3, 0.3),
    ];

    #[test]
    fn test_widths_respect_bounds() {
        let widths = column_widths(&COLUMNS, 100);
        assert_eq!(widths, vec![20, 30, 30]);
        assert!(widths.iter().sum::<u16>() <= 100);
    }

    #[test]
    fn test_leftover_goes_left_to_right() {
        let columns = [Column::new("A", 0.1, 0.6), Column::new("B", 0.1, 0.6)];
        // 10 + 10 minimum, 80 left: A grows to 60, B gets the remaining 30
        assert_eq!(column_widths(&columns, 100), vec![60, 40]);
    }

    #[test]
    fn test_never_exceeds_total() {
        let columns = [Column::new("A", 0.7, 0.9), Column::new("B", 0.6, 0.9)];
        let widths = column_widths(&columns, 10);
        assert!(widths.iter().sum::<u16>() <= 10);
        assert_eq!(column_widths(&columns, 0), vec![0, 0]);
    }
}
