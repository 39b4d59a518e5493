//! Request ranking — who deploys first.
//!
//! Requests that demand more bandwidth or tighter reliability get harder to
//! satisfy as the substrate fills up, so they claim resources first.

use flowgrid_core::Request;

/// Priority score per request, aligned with the input slice.
///
/// `rank = rate / Σrates`, plus a normalized availability-pressure term when
/// the batch carries more than one distinct availability requirement. A
/// zero rate sum falls back to equal rate shares.
pub fn request_ranks(requests: &[Request]) -> Vec<f64> {
    if requests.is_empty() {
        return Vec::new();
    }

    let rate_sum: f64 = requests.iter().map(|r| r.rate).sum();
    let avail_min = requests
        .iter()
        .map(|r| r.required_availability)
        .fold(f64::INFINITY, f64::min);
    let avail_max = requests
        .iter()
        .map(|r| r.required_availability)
        .fold(f64::NEG_INFINITY, f64::max);

    requests
        .iter()
        .map(|r| {
            let rate_share = if rate_sum > 0.0 {
                r.rate / rate_sum
            } else {
                1.0 / requests.len() as f64
            };
            let availability_pressure = if avail_max > avail_min {
                (r.required_availability - avail_min) / (avail_max - avail_min)
            } else {
                0.0
            };
            rate_share + availability_pressure
        })
        .collect()
}

/// Indices of `requests` in deployment order: rank descending, ties keep
/// input order.
pub fn deployment_order(requests: &[Request]) -> Vec<usize> {
    let ranks = request_ranks(requests);
    let mut order: Vec<usize> = (0..requests.len()).collect();
    // Stable sort, so equal ranks preserve input order.
    order.sort_by(|&a, &b| ranks[b].total_cmp(&ranks[a]));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowgrid_core::NfTypeId;

    fn request(id: usize, rate: f64, required: f64) -> Request {
        Request {
            id,
            source: 0,
            destination: 1,
            chain: vec![NfTypeId(1)],
            rate,
            required_availability: required,
        }
    }

    #[test]
    fn rate_and_availability_both_contribute() {
        let requests = vec![request(0, 20.0, 0.95), request(1, 15.0, 0.9)];
        let ranks = request_ranks(&requests);

        assert!((ranks[0] - (20.0 / 35.0 + 1.0)).abs() < 1e-12);
        assert!((ranks[1] - 15.0 / 35.0).abs() < 1e-12);
    }

    #[test]
    fn uniform_availability_drops_the_pressure_term() {
        let requests = vec![request(0, 10.0, 0.9), request(1, 30.0, 0.9)];
        let ranks = request_ranks(&requests);

        assert!((ranks[0] - 0.25).abs() < 1e-12);
        assert!((ranks[1] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn zero_rate_sum_falls_back_to_equal_shares() {
        let requests = vec![request(0, 0.0, 0.9), request(1, 0.0, 0.9)];
        let ranks = request_ranks(&requests);

        assert_eq!(ranks, vec![0.5, 0.5]);
    }

    #[test]
    fn order_is_rank_descending() {
        let requests = vec![request(0, 15.0, 0.9), request(1, 20.0, 0.95)];
        assert_eq!(deployment_order(&requests), vec![1, 0]);
    }

    #[test]
    fn ties_keep_input_order() {
        let requests = vec![
            request(0, 10.0, 0.9),
            request(1, 10.0, 0.9),
            request(2, 10.0, 0.9),
        ];
        assert_eq!(deployment_order(&requests), vec![0, 1, 2]);
    }

    #[test]
    fn empty_batch_is_empty_order() {
        assert!(deployment_order(&[]).is_empty());
        assert!(request_ranks(&[]).is_empty());
    }
}
