//! Export metrics

use crate::{ExportMetrics, Optimizations};
use pagesmith_codegen::FileDescriptor;

/// Score of an export of `element_count` elements: 100, minus 10 beyond
/// 50 elements, 20 more beyond 100 and 20 more beyond 200, plus 5 per
/// enabled optimization, clamped to 0..=100.
pub fn score(element_count: usize, optimizations: &Optimizations) -> u8 {
    let mut score: i64 = 100;
    if element_count > 50 {
        score -= 10;
    }
    if element_count > 100 {
        score -= 20;
    }
    if element_count > 200 {
        score -= 20;
    }
    score += 5 * optimizations.enabled_count() as i64;
    score.clamp(0, 100) as u8
}

pub fn measure(
    files: &[FileDescriptor],
    element_count: usize,
    optimizations: &Optimizations,
) -> ExportMetrics {
    ExportMetrics {
        file_count: files.len(),
        line_count: files.iter().map(FileDescriptor::line_count).sum(),
        byte_size: files.iter().map(FileDescriptor::byte_size).sum(),
        element_count,
        score: score(element_count, optimizations),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_codegen::{FileKind, SourceLanguage};

    #[test]
    fn test_score_thresholds() {
        let none = Optimizations::default();
        assert_eq!(score(0, &none), 100);
        assert_eq!(score(50, &none), 100);
        assert_eq!(score(51, &none), 90);
        assert_eq!(score(101, &none), 70);
        assert_eq!(score(201, &none), 50);
    }

    #[test]
    fn test_optimizations_raise_score_up_to_cap() {
        let all = Optimizations {
            minify: true,
            tree_shake: true,
            code_split: true,
        };
        assert_eq!(score(10, &all), 100);
        assert_eq!(score(150, &all), 85);
        assert_eq!(score(500, &all), 65);
    }

    #[test]
    fn test_measure() {
        let files = vec![
            FileDescriptor::new("a.html", "<p>\n</p>\n", FileKind::Component, SourceLanguage::Html),
            FileDescriptor::new("README.md", "# x", FileKind::Documentation, SourceLanguage::Markdown),
        ];
        let metrics = measure(&files, 3, &Optimizations::default());

        assert_eq!(metrics.file_count, 2);
        assert_eq!(metrics.line_count, 3);
        assert_eq!(metrics.byte_size, 12);
        assert_eq!(metrics.element_count, 3);
        assert_eq!(metrics.score, 100);
    }
}
