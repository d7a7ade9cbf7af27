// Integration tests for typed repositories
// Index assignment under both policies, lookup by index and name, overwrite.

use openclimate_core::{Company, Country, ExErrorKind, Partition, Record, Region};
use openclimate_store::{IndexPolicy, KeyedStore, Repository, StoreConfig};

fn store_with(policy: IndexPolicy) -> KeyedStore {
    KeyedStore::open(StoreConfig::in_memory().with_index_policy(policy)).unwrap()
}

#[test]
fn test_create_into_empty_partition_starts_at_one() {
    let store = KeyedStore::in_memory().unwrap();
    let countries: Repository<'_, Country> = Repository::new(&store);

    let created = countries.create(Country::new("Testland")).unwrap();
    assert_eq!(created.index, 1);

    let found = countries.retrieve_by_name("Testland").unwrap();
    assert_eq!(found, created);
}

#[test]
fn test_create_ignores_caller_supplied_index() {
    let store = KeyedStore::in_memory().unwrap();
    let countries: Repository<'_, Country> = Repository::new(&store);

    let mut country = Country::new("Testland");
    country.set_index(77);
    let created = countries.create(country).unwrap();

    assert_eq!(created.index, 1);
    assert!(!store.contains(Partition::Countries, 77).unwrap());
}

#[test]
fn test_sequential_creates_are_dense_under_both_policies() {
    for policy in [IndexPolicy::LiveCount, IndexPolicy::Monotonic] {
        let store = store_with(policy);
        let companies: Repository<'_, Company> = Repository::new(&store);

        let indices: Vec<_> = (0..5)
            .map(|i| companies.create(Company::new(format!("c{}", i))).unwrap().index)
            .collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 5], "policy {}", policy);
    }
}

#[test]
fn test_retrieve_by_index_returns_created_record() {
    let store = KeyedStore::in_memory().unwrap();
    let companies: Repository<'_, Company> = Repository::new(&store);

    let created = companies
        .create(
            Company::new("Acme")
                .with_description("widgets")
                .operate_in("A")
                .with_state("X"),
        )
        .unwrap();

    assert_eq!(companies.retrieve_by_index(created.index).unwrap(), created);
}

#[test]
fn test_retrieve_by_name_is_exact() {
    let store = KeyedStore::in_memory().unwrap();
    let countries: Repository<'_, Country> = Repository::new(&store);
    countries.create(Country::new("Alpha")).unwrap();
    let beta = countries.create(Country::new("Beta")).unwrap();

    assert_eq!(countries.retrieve_by_name("Beta").unwrap(), beta);

    let err = countries.retrieve_by_name("beta").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.partition(), Some(Partition::Countries));
}

#[test]
fn test_retrieve_by_name_returns_first_in_store_order() {
    let store = KeyedStore::in_memory().unwrap();
    let countries: Repository<'_, Country> = Repository::new(&store);
    let first = countries.create(Country::new("Twin")).unwrap();
    countries.create(Country::new("Twin")).unwrap();

    assert_eq!(countries.retrieve_by_name("Twin").unwrap().index, first.index);
}

#[test]
fn test_retrieve_missing_index_is_not_found() {
    let store = KeyedStore::in_memory().unwrap();
    let countries: Repository<'_, Country> = Repository::new(&store);

    let err = countries.retrieve_by_index(5).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.index(), Some(5));
}

#[test]
fn test_retrieve_wrong_shape_is_corruption() {
    let store = KeyedStore::in_memory().unwrap();
    store
        .save_bytes(Partition::Countries, 1, br#"{"name": 12}"#)
        .unwrap();
    let countries: Repository<'_, Country> = Repository::new(&store);

    let err = countries.retrieve_by_index(1).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::DataCorruption);

    let err = countries.retrieve_all().unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::DataCorruption);
}

#[test]
fn test_save_overwrites_whole_record() {
    let store = KeyedStore::in_memory().unwrap();
    let countries: Repository<'_, Country> = Repository::new(&store);
    let mut country = countries.create(Country::new("Testland")).unwrap();

    country.profile.population = 1_000;
    countries.save(&country).unwrap();

    let stored = countries.retrieve_by_index(country.index).unwrap();
    assert_eq!(stored.profile.population, 1_000);
    assert_eq!(countries.count().unwrap(), 1);
}

#[test]
fn test_save_without_index_is_invalid_input() {
    let store = KeyedStore::in_memory().unwrap();
    let countries: Repository<'_, Country> = Repository::new(&store);

    let err = countries.save(&Country::new("Unsaved")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(countries.count().unwrap(), 0);
}

#[test]
fn test_live_count_create_after_delete_overwrites_live_record() {
    let store = store_with(IndexPolicy::LiveCount);
    let companies: Repository<'_, Company> = Repository::new(&store);
    for name in ["one", "two", "three"] {
        companies.create(Company::new(name)).unwrap();
    }

    companies.delete(2).unwrap();
    let fourth = companies.create(Company::new("four")).unwrap();

    // count(live) + 1 = 3, which is still taken by "three"
    assert_eq!(fourth.index, 3);
    assert_eq!(companies.retrieve_by_index(3).unwrap().name, "four");
    assert_eq!(
        companies.retrieve_by_name("three").unwrap_err().kind(),
        ExErrorKind::NotFound
    );
    assert_eq!(companies.count().unwrap(), 2);
}

#[test]
fn test_monotonic_create_after_delete_never_reuses() {
    let store = store_with(IndexPolicy::Monotonic);
    let companies: Repository<'_, Company> = Repository::new(&store);
    for name in ["one", "two", "three"] {
        companies.create(Company::new(name)).unwrap();
    }

    companies.delete(2).unwrap();
    let fourth = companies.create(Company::new("four")).unwrap();

    assert_eq!(fourth.index, 4);
    assert_eq!(companies.retrieve_by_index(3).unwrap().name, "three");
    assert_eq!(companies.count().unwrap(), 3);
}

#[test]
fn test_monotonic_does_not_reuse_deleted_tail() {
    let store = KeyedStore::in_memory().unwrap();
    let countries: Repository<'_, Country> = Repository::new(&store);
    countries.create(Country::new("a")).unwrap();
    countries.create(Country::new("b")).unwrap();

    countries.delete(2).unwrap();

    assert_eq!(countries.create(Country::new("c")).unwrap().index, 3);
}

#[test]
fn test_live_count_reuses_deleted_index() {
    let store = store_with(IndexPolicy::LiveCount);
    let countries: Repository<'_, Country> = Repository::new(&store);
    for name in ["a", "b", "c", "d"] {
        countries.create(Country::new(name)).unwrap();
    }

    countries.delete(1).unwrap();

    // 3 live records, so the next create lands on 4 and replaces "d"
    assert_eq!(countries.create(Country::new("e")).unwrap().index, 4);
    assert_eq!(countries.count().unwrap(), 3);
}

#[test]
fn test_region_compound_lookup() {
    let store = KeyedStore::in_memory().unwrap();
    let regions: Repository<'_, Region> = Repository::new(&store);
    regions.create(Region::new("Georgia", "United States")).unwrap();
    let caucasus = regions.create(Region::new("Georgia", "Caucasus")).unwrap();

    let found = regions
        .retrieve_by_name_and_country("Georgia", "Caucasus")
        .unwrap();
    assert_eq!(found, caucasus);

    let err = regions
        .retrieve_by_name_and_country("Georgia", "Canada")
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_monotonic_counter_survives_reopen() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("openclimate.db");

    {
        let store = KeyedStore::open(StoreConfig::file(&path)).unwrap();
        let countries: Repository<'_, Country> = Repository::new(&store);
        countries.create(Country::new("a")).unwrap();
        countries.create(Country::new("b")).unwrap();
        countries.delete(2).unwrap();
    }

    let store = KeyedStore::open(StoreConfig::file(&path)).unwrap();
    let countries: Repository<'_, Country> = Repository::new(&store);
    assert_eq!(countries.create(Country::new("c")).unwrap().index, 3);
}

#[test]
fn test_monotonic_never_reuses_index_written_by_save() {
    let store = KeyedStore::in_memory().unwrap();
    let countries: Repository<'_, Country> = Repository::new(&store);

    let mut imported = Country::new("Imported");
    imported.set_index(3);
    countries.save(&imported).unwrap();
    countries.delete(3).unwrap();

    let indices: Vec<_> = ["a", "b", "c"]
        .into_iter()
        .map(|name| countries.create(Country::new(name)).unwrap().index)
        .collect();
    assert_eq!(indices, vec![4, 5, 6]);
}
