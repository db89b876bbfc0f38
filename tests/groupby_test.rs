use dubai_bank_analysis::groupby::GroupBy;

fn rows() -> Vec<(&'static str, Option<f64>)> {
    vec![
        ("Mashreq", Some(4.0)),
        ("Emirates NBD", Some(4.0)),
        ("Mashreq", Some(4.2)),
        ("Dubai Islamic Bank", None),
        ("Emirates NBD", Some(4.04)),
    ]
}

#[test]
fn test_groupby_creation() {
    let rows = rows();
    let group_by = GroupBy::new(&rows, |r| r.0.to_string());

    assert_eq!(group_by.group_count(), 3);
    let keys: Vec<&String> = group_by.keys().collect();
    assert_eq!(keys, vec!["Dubai Islamic Bank", "Emirates NBD", "Mashreq"]);
}

#[test]
fn test_groupby_size() {
    let rows = rows();
    let group_by = GroupBy::new(&rows, |r| r.0);

    let sizes = group_by.size();
    assert_eq!(sizes.get("Mashreq"), Some(&2));
    assert_eq!(sizes.get("Emirates NBD"), Some(&2));
    assert_eq!(sizes.get("Dubai Islamic Bank"), Some(&1));
}

#[test]
fn test_groupby_mean_skips_missing() {
    let rows = rows();
    let group_by = GroupBy::new(&rows, |r| r.0);
    let means = group_by.mean(|r| r.1);

    let mashreq = means["Mashreq"];
    assert!((mashreq.mean.unwrap() - 4.1).abs() < 1e-9);
    assert_eq!(mashreq.count, 2);

    let dib = means["Dubai Islamic Bank"];
    assert_eq!(dib.mean, None);
    assert_eq!(dib.excluded, 1);
}
