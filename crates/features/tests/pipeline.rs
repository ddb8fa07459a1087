//! Feature matrix and day stream behaviour on realistic daily tables.

use chrono::{Duration, NaiveDate};
use std::io::Write;
use weather_core::{Error, FeatureConfig, LoaderConfig, Table};
use weather_features::{build_features, stream_days, stream_series_days, FeatureBuilder};
use weather_ingestion::WeatherStation;

const TARGET: &str = "DailyAverageDryBulbTemperature";

fn day(i: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(i as i64)
}

fn df_ok(n: usize) -> Table {
    Table::new(
        vec!["DATE".into(), TARGET.into()],
        (0..n)
            .map(|i| vec![day(i).to_string(), format!("{}", ((i * 3) % 40) as f64)])
            .collect(),
    )
}

fn shuffled(table: &Table) -> Table {
    let n = table.len();
    let rows = (0..n)
        .map(|i| table.record((i * 17 + 5) % n).unwrap().values().to_vec())
        .collect();
    Table::new(table.headers().to_vec(), rows)
}

#[test]
fn test_build_features_columns_exist() {
    let out = build_features(&df_ok(120), &FeatureConfig::default()).unwrap();

    assert!(out.has_column(&format!("{TARGET}_lag_1")));
    assert!(out.has_column(&format!("{TARGET}_rollmean_7")));
    assert!(out.has_column("month"));
    assert!(out.has_column("doy_sin"));
    assert!(out.has_column("doy_cos"));
    assert_eq!(out.columns().len(), 1 + 4 + 2 * 3 + 5);
}

#[test]
fn test_build_features_drops_rows() {
    let df = df_ok(80);
    let config = FeatureConfig::default().with_lags(vec![1, 7]).with_windows(vec![14]);
    let out = build_features(&df, &config).unwrap();
    assert!(out.len() < df.len());
}

#[test]
fn test_no_missing_values_and_chronological() {
    let out = build_features(&shuffled(&df_ok(120)), &FeatureConfig::default()).unwrap();
    assert!(out.dates().windows(2).all(|w| w[0] < w[1]));
    for column in out.columns() {
        assert_eq!(column.values.len(), out.len());
        assert!(column.values.iter().all(|v| v.is_finite()), "{}", column.name);
    }
}

#[test]
fn test_rollmean_uses_only_earlier_days() {
    let df = df_ok(120);
    let out = build_features(&df, &FeatureConfig::default()).unwrap();
    let target_by_day = |d: NaiveDate| ((d - day(0)).num_days() as usize * 3 % 40) as f64;

    for w in [3usize, 7, 14] {
        let rollmean = out.column(&format!("{TARGET}_rollmean_{w}")).unwrap();
        for (i, date) in out.dates().iter().enumerate() {
            let expected = (1..=w as i64)
                .map(|back| target_by_day(*date - Duration::days(back)))
                .sum::<f64>()
                / w as f64;
            assert!((rollmean[i] - expected).abs() < 1e-9, "window {w} on {date}");
        }
    }
}

#[test]
fn test_changing_current_day_leaves_its_windows_alone() {
    let df = df_ok(120);
    let mut rows: Vec<Vec<String>> = df.records().map(|r| r.values().to_vec()).collect();
    rows[60][1] = "1000".into();
    let spiked = Table::new(df.headers().to_vec(), rows);

    let base = build_features(&df, &FeatureConfig::default()).unwrap();
    let out = build_features(&spiked, &FeatureConfig::default()).unwrap();
    let i = out.dates().iter().position(|d| *d == day(60)).unwrap();

    for w in [3, 7, 14] {
        let name = format!("{TARGET}_rollmean_{w}");
        assert_eq!(out.column(&name).unwrap()[i], base.column(&name).unwrap()[i]);
        // the next day sees the spike
        assert!(out.column(&name).unwrap()[i + 1] > base.column(&name).unwrap()[i + 1]);
    }
}

#[test]
fn test_too_few_rows_suggests_remediation() {
    let err = build_features(&df_ok(33), &FeatureConfig::default().with_windows(vec![14]))
        .unwrap_err();
    assert!(matches!(err, Error::FeatureBuild(_)));
    assert!(err.to_string().contains("reduce lags/windows or check data"));
}

#[test]
fn test_stream_days_order() {
    let df = shuffled(&df_ok(40));
    let items: Vec<_> = stream_days(&df, "DATE").unwrap().collect();
    assert!(items[0].0 <= items[1].0);
    assert!(items.windows(2).all(|w| w[0].0 <= w[1].0));
}

#[test]
fn test_stream_days_count() {
    let df = df_ok(30);
    let items: Vec<_> = stream_days(&df, "DATE").unwrap().collect();
    assert_eq!(items.len(), df.len());
}

#[test]
fn test_stream_days_keeps_duplicates() {
    let mut rows: Vec<Vec<String>> = df_ok(30).records().map(|r| r.values().to_vec()).collect();
    rows.push(vec![day(3).to_string(), "55".into()]);
    let df = Table::new(vec!["DATE".into(), TARGET.into()], rows);

    let items: Vec<_> = stream_days(&df, "DATE").unwrap().collect();
    assert_eq!(items.len(), 31);
    assert_eq!(items.iter().filter(|(d, _)| *d == day(3)).count(), 2);
}

#[test]
fn test_independent_streams_over_one_table() {
    let df = shuffled(&df_ok(40));
    let mut a = stream_days(&df, "DATE").unwrap();
    let b = stream_days(&df, "DATE").unwrap();
    a.next();
    assert_eq!(a.len(), 39);
    assert_eq!(b.len(), 40);
}

#[test]
fn test_loaded_station_to_features() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("albany.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "STATION,DATE,{TARGET}").unwrap();
    for i in (0..150).rev() {
        let value = if i % 23 == 0 { "M".to_string() } else { format!("{}", 30 + i % 20) };
        writeln!(file, "USW00014735,{}T23:59:00,{value}", day(i)).unwrap();
    }
    drop(file);

    let station = WeatherStation::load(&path, &LoaderConfig::default()).unwrap();
    let builder = FeatureBuilder::new(FeatureConfig::default()).unwrap();
    let from_series = builder.build_series(station.series()).unwrap();
    let from_table = builder.build(&station.series().to_table()).unwrap();

    assert_eq!(from_series, from_table);
    assert_eq!(from_series.len(), station.series().len() - 14);
    assert_eq!(stream_series_days(station.series()).len(), station.series().len());
}
