use super::*;
use anyhow::Result;
use proptest::prelude::*;

#[test]
fn test_describe_uses_each_columns_own_values() -> Result<()> {
    let upload = scores();
    let (rows, notices) = describe(&upload.table, &selection(&["math", "science"]))?;
    assert!(notices.is_empty());

    let math = &rows[0];
    assert_eq!(math.column, "math");
    assert_eq!(math.count, 1);
    assert!(approx(math.mean, 90.0));
    assert_eq!(math.std_dev, None);

    let science = &rows[1];
    assert_eq!(science.count, 2);
    assert!(approx(science.mean, 75.0));
    assert!(approx(science.std_dev, 50f64.sqrt()));
    assert!(approx(science.min, 70.0));
    assert!(approx(science.p25, 72.5));
    assert!(approx(science.p50, 75.0));
    assert!(approx(science.p75, 77.5));
    assert!(approx(science.max, 80.0));
    Ok(())
}

#[test]
fn test_empty_column_reports_notice() -> Result<()> {
    let df = df!("score" => [None::<f64>, None])?;
    let (rows, notices) = describe(&df, &selection(&["score"]))?;
    assert_eq!(rows, [StatisticsRow::empty("score")]);
    assert_eq!(
        notices,
        [Notice::EmptyColumn {
            column: "score".to_owned()
        }]
    );
    Ok(())
}

#[test]
fn test_integer_column_quantiles() -> Result<()> {
    let df = df!("n" => [1i64, 2, 3, 4])?;
    let row = describe_column(&df, "n")?;
    assert_eq!(row.count, 4);
    assert!(approx(row.mean, 2.5));
    assert!(approx(row.p25, 1.75));
    assert!(approx(row.p50, 2.5));
    assert!(approx(row.p75, 3.25));
    Ok(())
}

proptest! {
    #[test]
    fn prop_count_matches_and_quantiles_are_ordered(
        cells in prop::collection::vec(prop::option::of(-1e6f64..1e6), 1..60)
    ) {
        let present = cells.iter().flatten().count();
        let df = df!("v" => cells).unwrap();
        let row = describe_column(&df, "v").unwrap();

        prop_assert_eq!(row.count, present);
        if present > 0 {
            let (min, p25, p50, p75, max) = (
                row.min.unwrap(),
                row.p25.unwrap(),
                row.p50.unwrap(),
                row.p75.unwrap(),
                row.max.unwrap(),
            );
            prop_assert!(min <= p25 && p25 <= p50 && p50 <= p75 && p75 <= max);
        } else {
            prop_assert_eq!(row.mean, None);
        }
    }
}
