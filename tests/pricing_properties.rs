use approx::{assert_abs_diff_eq, assert_relative_eq};
use bs_heatmap::models::{generate_grid, generate_grid_parallel, ContractParams, HeatmapRequest};
use bs_heatmap::utils::axis::{linspace, AxisSpec};
use bs_heatmap::utils::price;
use bs_heatmap::OptionType;

const STRIKES: [f64; 3] = [50.0, 100.0, 180.0];
const MATURITIES: [f64; 3] = [0.05, 1.0, 4.0];
const RATES: [f64; 4] = [-0.01, 0.0, 0.03, 0.1];
const VOLS: [f64; 4] = [0.05, 0.2, 0.5, 1.2];

#[test]
fn put_call_parity_holds_across_inputs() {
    for &k in &STRIKES {
        for &t in &MATURITIES {
            for &r in &RATES {
                for &sigma in &VOLS {
                    for s in linspace(10.0, 300.0, 30).iter().copied() {
                        let call = price(OptionType::Call, s, k, t, r, sigma);
                        let put = price(OptionType::Put, s, k, t, r, sigma);
                        let forward_gap = s - k * (-r * t).exp();
                        assert_relative_eq!(
                            call - put,
                            forward_gap,
                            epsilon = 1e-9 * s.max(k),
                            max_relative = 1e-9
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn call_rises_and_put_falls_with_spot() {
    for &k in &STRIKES {
        for &sigma in &VOLS {
            let spots = linspace(1.0, 400.0, 400);
            let mut prev_call = f64::NEG_INFINITY;
            let mut prev_put = f64::INFINITY;
            for &s in spots.iter() {
                let call = price(OptionType::Call, s, k, 1.0, 0.05, sigma);
                let put = price(OptionType::Put, s, k, 1.0, 0.05, sigma);
                assert!(call >= prev_call - 1e-12, "call fell at S={} K={} vol={}", s, k, sigma);
                assert!(put <= prev_put + 1e-12, "put rose at S={} K={} vol={}", s, k, sigma);
                prev_call = call;
                prev_put = put;
            }
        }
    }
}

#[test]
fn vanishing_volatility_collapses_to_discounted_intrinsic() {
    let (k, t, r): (f64, f64, f64) = (100.0, 1.0, 0.05);
    let discounted = ContractParams::new(k, t, r).discounted_strike();
    for &s in &[50.0, 80.0, 90.0, 100.0, 120.0, 150.0] {
        let call = price(OptionType::Call, s, k, t, r, 1e-6);
        assert_abs_diff_eq!(call, (s - discounted).max(0.0), epsilon = 1e-6);
    }
}

#[test]
fn textbook_reference_values() {
    let call = price(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2);
    let put = price(OptionType::Put, 100.0, 100.0, 1.0, 0.05, 0.2);
    assert_abs_diff_eq!(call, 10.4506, epsilon = 1e-3);
    assert_abs_diff_eq!(put, 5.5735, epsilon = 1e-3);
}

#[test]
fn grid_cells_match_independent_prices() {
    let params = ContractParams::new(95.0, 0.75, 0.02);
    let spots = linspace(60.0, 140.0, 7);
    let vols = linspace(0.1, 0.9, 4);
    let (calls, puts) = generate_grid(&params, spots.as_slice().unwrap(), vols.as_slice().unwrap());
    assert_eq!(calls.dim(), (4, 7));
    assert_eq!(puts.dim(), (4, 7));
    for (j, &sigma) in vols.iter().enumerate() {
        for (i, &s) in spots.iter().enumerate() {
            let call = price(OptionType::Call, s, 95.0, 0.75, 0.02, sigma);
            let put = price(OptionType::Put, s, 95.0, 0.75, 0.02, sigma);
            assert_eq!(calls[[j, i]].to_bits(), call.to_bits());
            assert_eq!(puts[[j, i]].to_bits(), put.to_bits());
        }
    }
}

#[test]
fn two_by_two_grid_orientation() {
    let params = ContractParams::new(100.0, 1.0, 0.05);
    let (calls, puts) = generate_grid(&params, &[50.0, 150.0], &[0.2, 0.5]);
    assert_eq!(calls.dim(), (2, 2));

    assert_eq!(calls[[0, 0]], price(OptionType::Call, 50.0, 100.0, 1.0, 0.05, 0.2));
    assert_eq!(calls[[1, 1]], price(OptionType::Call, 150.0, 100.0, 1.0, 0.05, 0.5));

    // deep out-of-the-money call is nearly worthless, deep in-the-money is
    // worth at least its discounted intrinsic value
    assert!(calls[[0, 0]] < 0.1);
    assert!(calls[[1, 1]] > 150.0 - 100.0 * (-0.05f64).exp());
    // along each row the call grows and the put shrinks with spot
    for j in 0..2 {
        assert!(calls[[j, 1]] > calls[[j, 0]]);
        assert!(puts[[j, 1]] < puts[[j, 0]]);
    }
    // higher volatility is worth more for both legs
    for i in 0..2 {
        assert!(calls[[1, i]] > calls[[0, i]]);
        assert!(puts[[1, i]] > puts[[0, i]]);
    }
}

#[test]
fn repeated_evaluation_is_bit_identical() {
    let request = HeatmapRequest::new(
        ContractParams::new(100.0, 1.0, 0.05),
        AxisSpec::new(50.0, 150.0, 25),
        AxisSpec::new(0.1, 1.0, 25),
    );
    let first = request.evaluate(false).unwrap();
    let second = request.evaluate(false).unwrap();
    let parallel = request.evaluate(true).unwrap();

    let bits = |a: &ndarray::Array2<f64>| a.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&first.calls), bits(&second.calls));
    assert_eq!(bits(&first.puts), bits(&second.puts));
    assert_eq!(bits(&first.calls), bits(&parallel.calls));
    assert_eq!(bits(&first.puts), bits(&parallel.puts));
}

#[test]
fn parallel_grid_handles_empty_axes() {
    let params = ContractParams::new(100.0, 1.0, 0.05);
    let (calls, puts) = generate_grid_parallel(&params, &[], &[0.2]);
    assert_eq!(calls.dim(), (1, 0));
    assert_eq!(puts.dim(), (1, 0));
}

#[test]
fn heatmap_serializes_nan_cells_as_null() {
    let request = HeatmapRequest::new(
        ContractParams::new(100.0, 1.0, 0.05),
        AxisSpec::new(0.0, 100.0, 2),
        AxisSpec::new(0.2, 0.2, 1),
    );
    let heatmap = request.evaluate(false).unwrap();
    let json = serde_json::to_value(&heatmap).unwrap();
    assert!(json["calls"]["data"][0].is_null());
    assert!(json["calls"]["data"][1].is_number());
    assert_eq!(json["params"]["strike"], 100.0);
}
