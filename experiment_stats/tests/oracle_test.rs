//! Distribution functions checked against `statrs`.

use experiment_stats::math::distributions::{chi_square_cdf, f_cdf, student_t_cdf};
use experiment_stats::math::special::{normal_cdf, normal_quantile};
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, Normal, StudentsT};

const TOLERANCE: f64 = 1e-6;

#[test]
fn test_normal_cdf_matches_statrs() -> anyhow::Result<()> {
    let reference = Normal::new(0.0, 1.0)?;
    for i in -40..=40 {
        let x = i as f64 * 0.1;
        assert!(
            (normal_cdf(x) - reference.cdf(x)).abs() < TOLERANCE,
            "x = {}",
            x
        );
    }
    Ok(())
}

#[test]
fn test_normal_quantile_matches_statrs() -> anyhow::Result<()> {
    let reference = Normal::new(0.0, 1.0)?;
    for &p in &[1e-5, 0.001, 0.01, 0.025, 0.1, 0.3, 0.5, 0.7, 0.9, 0.975, 0.999] {
        assert!(
            (normal_quantile(p) - reference.inverse_cdf(p)).abs() < TOLERANCE,
            "p = {}",
            p
        );
    }
    Ok(())
}

#[test]
fn test_student_t_matches_statrs_for_nonnegative_t() -> anyhow::Result<()> {
    for &df in &[1.0, 2.0, 3.5, 8.0, 25.0, 60.0, 100.0] {
        let reference = StudentsT::new(0.0, 1.0, df)?;
        for &t in &[0.0, 0.25, 1.0, 1.96, 2.5, 4.0, 8.0] {
            assert!(
                (student_t_cdf(t, df) - reference.cdf(t)).abs() < TOLERANCE,
                "t = {}, df = {}",
                t,
                df
            );
        }
    }
    Ok(())
}

#[test]
fn test_f_matches_statrs() -> anyhow::Result<()> {
    for &(df1, df2) in &[(1.0, 1.0), (1.0, 8.0), (2.0, 12.0), (3.0, 27.0), (5.0, 5.0), (10.0, 2.0)] {
        let reference = FisherSnedecor::new(df1, df2)?;
        for &f in &[0.1, 0.5, 1.0, 2.0, 4.5, 10.0] {
            assert!(
                (f_cdf(f, df1, df2) - reference.cdf(f)).abs() < TOLERANCE,
                "f = {}, df = ({}, {})",
                f,
                df1,
                df2
            );
        }
    }
    Ok(())
}

#[test]
fn test_chi_square_matches_statrs() -> anyhow::Result<()> {
    for &df in &[1.0, 2.0, 3.0, 5.0, 10.0, 30.0] {
        let reference = ChiSquared::new(df)?;
        for &x in &[0.01, 0.5, 1.0, 3.0, 7.0, 15.0, 40.0] {
            assert!(
                (chi_square_cdf(x, df) - reference.cdf(x)).abs() < TOLERANCE,
                "x = {}, df = {}",
                x,
                df
            );
        }
    }
    Ok(())
}
