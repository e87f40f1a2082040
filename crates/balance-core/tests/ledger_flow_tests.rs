use balance_core::{
    annual_net, apply,
    codec::{categories_from_text, ledger_from_text, ledger_to_text},
    period_totals,
    reducer::apply_all,
    Action, SelectionSet,
};
use balance_domain::{Category, CategoryType, Ledger, Period, Section};

fn household() -> Ledger {
    let mut ledger = Ledger::empty();
    for (offset, period) in Period::ALL.into_iter().enumerate() {
        let bump = offset as f64;
        ledger.period_mut(period).categories = vec![
            Category::new("Salary", CategoryType::Income).with_sections([
                Section::with_value("Base", 3200.0 + bump),
                Section::with_value("Side", 120.25),
            ]),
            Category::new("Housing", CategoryType::Expense).with_sections([
                Section::with_value("Rent", 1450.0),
                Section::with_value("Insurance", 38.9 * bump),
            ]),
            Category::new("Adjustments", CategoryType::Expense)
                .with_sections([Section::with_value("Refund", -42.0)]),
        ];
    }
    ledger
}

fn signed_sum(ledger: &Ledger, period: Period) -> f64 {
    ledger
        .categories(period)
        .iter()
        .flat_map(|category| {
            let sign = if category.is_income() { 1.0 } else { -1.0 };
            category.sections.iter().map(move |section| sign * section.value)
        })
        .sum()
}

#[test]
fn default_ledger_salary_scenario() {
    let ledger = apply_all(
        Ledger::empty(),
        [
            Action::AddCategory {
                period: Period::January,
                category_type: CategoryType::Income,
                name: "Salary".into(),
            },
            Action::AddCategoryItem {
                period: Period::January,
                index: 0,
                name: "Base".into(),
            },
            Action::ChangeCategoryItemValue {
                period: Period::January,
                index: 0,
                item_index: 0,
                value: 5000.0,
            },
        ],
    );

    assert_eq!(period_totals(&ledger, Period::January).total_income, 5000.0);
    assert_eq!(period_totals(&ledger, Period::January).total_expense, 0.0);
    for period in Period::ALL.into_iter().skip(1) {
        let totals = period_totals(&ledger, period);
        assert_eq!(totals.total_income, 0.0, "{period}");
        assert_eq!(totals.total_expense, 0.0, "{period}");
    }
    assert_eq!(annual_net(&ledger), 5000.0);
}

#[test]
fn period_net_matches_signed_section_sum() {
    let ledger = household();
    for period in Period::ALL {
        let totals = period_totals(&ledger, period);
        let diff = (totals.net() - signed_sum(&ledger, period)).abs();
        assert!(diff < 1e-9, "{period}: off by {diff}");
    }
}

#[test]
fn annual_net_matches_sum_of_period_nets() {
    let ledger = household();
    let expected: f64 = Period::ALL
        .into_iter()
        .map(|period| period_totals(&ledger, period).net())
        .sum();
    assert!((annual_net(&ledger) - expected).abs() < 1e-9);
}

#[test]
fn deleting_out_of_range_category_is_structurally_idempotent() {
    let ledger = household();
    for index in [3, 4, 100, usize::MAX] {
        let after = apply(
            ledger.clone(),
            Action::DeleteCategory {
                period: Period::April,
                index,
            },
        );
        assert_eq!(after, ledger);
    }
}

#[test]
fn export_then_import_is_lossless() {
    let ledger = household();
    let text = ledger_to_text(&ledger).expect("export");
    let imported = ledger_from_text(&text).expect("import");
    assert_eq!(imported, ledger);
}

#[test]
fn toggle_twice_restores_the_selection() {
    let base = SelectionSet::new()
        .toggle(&Category::new("Salary", CategoryType::Income))
        .toggle(&Category::new("Housing", CategoryType::Expense));
    let extra = Category::new("Travel", CategoryType::Expense)
        .with_sections([Section::with_value("Flights", 640.0)]);

    assert_eq!(base.toggle(&extra).toggle(&extra), base);
    assert_eq!(SelectionSet::new().toggle(&extra).toggle(&extra), SelectionSet::new());
}

#[test]
fn spreading_two_categories_reaches_every_period() {
    let ledger = household();
    let chosen = ledger.categories(Period::March);
    let selection = SelectionSet::new().toggle(&chosen[0]).toggle(&chosen[1]);

    let spread = selection.spread(ledger.clone());

    for period in Period::ALL {
        let before = ledger.categories(period);
        let after = spread.categories(period);
        assert_eq!(after.len(), before.len() + 2, "{period}");
        assert_eq!(&after[..before.len()], before);
        assert_eq!(&after[before.len()..], selection.categories());
    }
}

#[test]
fn seventeen_digit_values_survive_export_and_import() {
    let values = [
        1024.0742976259073,
        0.1 + 0.2,
        1.0 / 3.0,
        f64::EPSILON,
        -7331.0 - 1e-12,
        f64::MAX,
    ];
    let mut ledger = Ledger::empty();
    for (offset, period) in Period::ALL.into_iter().enumerate() {
        let sections = values
            .iter()
            .map(|value| Section::with_value("Item", value / (offset as f64 + 1.0)));
        ledger.period_mut(period).categories =
            vec![Category::new("Mixed", CategoryType::Expense).with_sections(sections)];
    }

    let imported = ledger_from_text(&ledger_to_text(&ledger).expect("export")).expect("import");

    for period in Period::ALL {
        let written = &ledger.categories(period)[0].sections;
        let read = &imported.categories(period)[0].sections;
        for (before, after) in written.iter().zip(read) {
            assert_eq!(before.value.to_bits(), after.value.to_bits(), "{period}");
        }
    }
}

#[test]
fn clipboard_types_other_than_income_count_as_expense() {
    let categories = categories_from_text(
        r#"[{"name":"Pay","type":"income","sections":[{"name":"a","value":100}]},
            {"name":"Fees","type":"Expense","sections":[{"name":"b","value":30}]},
            {"name":"Move","type":"transfer","sections":[{"name":"c","value":20}]}]"#,
    )
    .expect("clipboard categories");
    let ledger = apply(
        Ledger::empty(),
        Action::AddCategories {
            period: Period::May,
            categories,
        },
    );

    let totals = period_totals(&ledger, Period::May);
    assert_eq!(totals.total_income, 100.0);
    assert_eq!(totals.total_expense, 50.0);
}
