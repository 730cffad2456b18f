use factorfft::exact::pi;
use factorfft::planner::Direction;
use factorfft::{evaluate, next_root, Decimal, FftError, Options, Root, RootF, SeriesPolicy};
use utilities::assert_float_closeness;

const BASE: u32 = 1_000_000_000;

#[test]
fn special_angles_are_exact() {
    let options = Options::default();
    let places = 4;
    let one = Decimal::from_integer(1, places, BASE);
    let zero = Decimal::zero(places, BASE);

    assert_eq!(evaluate(0, 1, places, &options).unwrap(), (one.clone(), zero.clone()));
    assert_eq!(evaluate(1, 2, places, &options).unwrap(), (zero.clone(), one.clone()));
    assert_eq!(evaluate(1, 1, places, &options).unwrap(), (one.neg(), zero.clone()));
    assert_eq!(evaluate(3, 2, places, &options).unwrap(), (zero.clone(), one.neg()));

    let half = vec![0, 0, 0, BASE / 2, 0];
    assert_eq!(evaluate(1, 3, places, &options).unwrap().0.limbs(), half);
    assert_eq!(evaluate(1, 6, places, &options).unwrap().1.limbs(), half);
    assert_eq!(evaluate(-5, 3, places, &options).unwrap().0.limbs(), half);
    assert!(evaluate(2, 3, places, &options).unwrap().0.is_negative());

    let (cos, sin) = evaluate(1, 4, places, &options).unwrap();
    assert_eq!(cos, sin);
    assert_float_closeness(cos.to_float::<f64>(), std::f64::consts::FRAC_1_SQRT_2, 1e-15);
}

#[test]
fn series_values_match_libm() {
    let options = Options::default();
    for (a, b) in [(1, 5), (2, 7), (3, 8), (-7, 9), (11, 12), (1, 1000), (999, 1000)] {
        let (cos, sin) = evaluate(a, b, 3, &options).unwrap();
        let angle = a as f64 * std::f64::consts::PI / b as f64;
        assert_float_closeness(cos.to_float::<f64>(), angle.cos(), 1e-15);
        assert_float_closeness(sin.to_float::<f64>(), angle.sin(), 1e-15);
    }
}

#[test]
fn zero_denominator_is_rejected() {
    assert_eq!(
        evaluate(1, 0, 2, &Options::default()).unwrap_err(),
        FftError::ZeroDenominator
    );
}

#[test]
fn degenerate_limb_bases_are_errors() {
    for base in [0, 1] {
        let mut options = Options::default();
        options.limb_base = base;
        assert_eq!(
            evaluate(2, 7, 3, &options).unwrap_err(),
            FftError::InvalidLimbBase(base)
        );
        assert_eq!(pi(3, base).unwrap_err(), FftError::InvalidLimbBase(base));
        assert_eq!(
            Root::primitive(12, Direction::Forward, &options).unwrap_err(),
            FftError::InvalidLimbBase(base)
        );
    }
}

#[test]
fn term_policy_bounds_the_work() {
    let coarse = Options::default().with_series(SeriesPolicy::Terms(3));
    let (cos, _) = evaluate(1, 5, 3, &coarse).unwrap();
    // three terms of the cosine series leave an error near x^6/720
    let x = std::f64::consts::PI / 5.0;
    let error = (cos.to_float::<f64>() - x.cos()).abs();
    assert!(error > 1e-6 && error < x.powi(6) / 720.0 * 1.01, "{error}");
}

#[test]
fn pi_in_other_bases() {
    let decimal = pi(2, BASE).unwrap();
    assert_eq!(decimal.limbs(), vec![358_979_323, 141_592_653, 3]);
    let binary = pi(3, 2).unwrap();
    // 3.001 in base 2 truncates 3.14159...
    assert_eq!(binary.limbs(), vec![1, 0, 0, 1, 1]);
}

#[test]
fn chained_roots_stay_on_the_circle() {
    let options = Options::default();
    let base = Root::primitive(360, Direction::Forward, &options).unwrap();
    let mut running = Root::one(base.places(), options.limb_base);
    for _ in 0..90 {
        running = next_root(&running, &base);
    }
    let (re, im) = running.to_float::<f64>();
    assert_float_closeness(re, 0.0, 1e-30);
    assert_float_closeness(im, -1.0, 1e-30);
}

#[test]
fn float_roots_follow_the_exact_ones() {
    let options = Options::default();
    for n in [3, 10, 17, 256] {
        let exact = Root::primitive(n, Direction::Inverse, &options).unwrap();
        let float = RootF::<f64>::from_exact(&exact);
        let libm = RootF::<f64>::primitive(n, Direction::Inverse);
        assert_float_closeness(float.re, libm.re, 1e-15);
        assert_float_closeness(float.im, libm.im, 1e-15);
    }
}
