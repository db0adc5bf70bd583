//! Ranking and pagination of checked results.
//!
//! Results are sorted by ascending price (stable, so ties keep their
//! original relative order) and sliced into fixed-size pages. Page numbers
//! are 1-based; out-of-range pages are not an error and simply yield an
//! empty slice — validating the page number is the caller's job.

use crate::types::{DomainResult, Pagination, SuggestionPage};

/// Sort results by price and return the requested page with metadata.
///
/// # Arguments
///
/// * `results` - The full result set for the request
/// * `page` - 1-based page number; values below 1 are treated as 1
/// * `page_size` - Number of items per page, at least 1
pub fn paginate(mut results: Vec<DomainResult>, page: usize, page_size: usize) -> SuggestionPage {
    let page = page.max(1);
    let page_size = page_size.max(1);

    // Stable ascending sort; total_cmp keeps NaN-free f64 ordering total.
    results.sort_by(|a, b| a.price.total_cmp(&b.price));

    let total_domains = results.len();
    let total_pages = total_domains.div_ceil(page_size).max(1);

    let start = (page - 1).saturating_mul(page_size);
    let items: Vec<DomainResult> = results.into_iter().skip(start).take(page_size).collect();

    SuggestionPage {
        items,
        pagination: Pagination {
            current_page: page,
            total_pages,
            total_domains,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(prices: &[f64]) -> Vec<DomainResult> {
        prices
            .iter()
            .enumerate()
            .map(|(i, price)| DomainResult {
                domain: format!("domain{}.com", i),
                available: true,
                price: *price,
            })
            .collect()
    }

    #[test]
    fn test_sorted_ascending_by_price() {
        let page = paginate(results(&[19.99, 8.99, 12.50]), 1, 20);
        let prices: Vec<f64> = page.items.iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![8.99, 12.50, 19.99]);
    }

    #[test]
    fn test_ties_keep_original_order() {
        let mut input = results(&[9.99, 9.99, 9.99]);
        input[0].domain = "first.com".to_string();
        input[1].domain = "second.com".to_string();
        input[2].domain = "third.com".to_string();

        let page = paginate(input, 1, 20);
        let domains: Vec<&str> = page.items.iter().map(|r| r.domain.as_str()).collect();
        assert_eq!(domains, vec!["first.com", "second.com", "third.com"]);
    }

    #[test]
    fn test_forty_five_results_three_pages() {
        let input: Vec<f64> = (0..45).map(|i| 5.0 + i as f64).collect();

        let page1 = paginate(results(&input), 1, 20);
        assert_eq!(page1.items.len(), 20);
        assert_eq!(page1.pagination.total_pages, 3);
        assert_eq!(page1.pagination.total_domains, 45);
        assert_eq!(page1.pagination.current_page, 1);

        let page3 = paginate(results(&input), 3, 20);
        assert_eq!(page3.items.len(), 5);
        assert_eq!(page3.pagination.current_page, 3);
    }

    #[test]
    fn test_exact_multiple_of_page_size() {
        let input: Vec<f64> = (0..40).map(|i| i as f64).collect();
        let page = paginate(results(&input), 2, 20);
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[test]
    fn test_empty_results_single_empty_page() {
        let page = paginate(Vec::new(), 1, 20);
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_pages, 1);
        assert_eq!(page.pagination.total_domains, 0);
    }

    #[test]
    fn test_out_of_range_page_yields_empty_slice() {
        let page = paginate(results(&[1.0, 2.0]), 7, 20);
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.current_page, 7);
        assert_eq!(page.pagination.total_pages, 1);
        assert_eq!(page.pagination.total_domains, 2);
    }

    #[test]
    fn test_page_zero_treated_as_first() {
        let page = paginate(results(&[3.0, 1.0]), 0, 20);
        assert_eq!(page.pagination.current_page, 1);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].price, 1.0);
    }

    #[test]
    fn test_second_page_continues_sorted_order() {
        let input: Vec<f64> = (0..25).rev().map(|i| i as f64).collect();
        let page2 = paginate(results(&input), 2, 20);
        assert_eq!(page2.items.len(), 5);
        assert_eq!(page2.items[0].price, 20.0);
        assert_eq!(page2.items[4].price, 24.0);
    }
}
