// Integration tests for relation helpers across record kinds

use openclimate_core::{
    ActorRef, Asset, Company, Country, ExErrorKind, Partition, Pledge, PledgeOwner, Region,
};
use openclimate_store::{KeyedStore, Repositories};

#[test]
fn test_attach_pledge_lists_it_on_the_actor() {
    let store = KeyedStore::in_memory().unwrap();
    let repos = Repositories::new(&store);
    let country = repos.countries.create(Country::new("A")).unwrap();

    let pledge = repos
        .attach_pledge(
            Pledge::new("Net zero", ActorRef::country(country.index)).with_target(2005, 2050, 100.0),
        )
        .unwrap();

    let country = repos.countries.retrieve_by_index(country.index).unwrap();
    assert_eq!(country.pledges(), &[pledge.index]);
    assert_eq!(repos.pledges_of(country.pledges()).unwrap(), vec![pledge]);
}

#[test]
fn test_attach_pledge_to_missing_actor_writes_nothing() {
    let store = KeyedStore::in_memory().unwrap();
    let repos = Repositories::new(&store);

    let err = repos
        .attach_pledge(Pledge::new("Orphan", ActorRef::company(9)))
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.partition(), Some(Partition::Companies));
    assert_eq!(repos.pledges.count().unwrap(), 0);
}

#[test]
fn test_attach_pledge_to_state() {
    let store = KeyedStore::in_memory().unwrap();
    let repos = Repositories::new(&store);
    let region = repos.regions.create(Region::new("X", "A")).unwrap();

    let pledge = repos
        .attach_pledge(Pledge::new("Coal exit", ActorRef::state(region.index)))
        .unwrap();

    let region = repos.regions.retrieve_by_index(region.index).unwrap();
    assert_eq!(region.pledges, vec![pledge.index]);
}

#[test]
fn test_pledges_of_fails_on_dangling_index() {
    let store = KeyedStore::in_memory().unwrap();
    let repos = Repositories::new(&store);
    let company = repos.companies.create(Company::new("Acme")).unwrap();
    repos
        .attach_pledge(Pledge::new("p", ActorRef::company(company.index)))
        .unwrap();

    let err = repos.pledges_of(&[1, 2]).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.index(), Some(2));
}

#[test]
fn test_company_countries_and_states_follow_company_order() {
    let store = KeyedStore::in_memory().unwrap();
    let repos = Repositories::new(&store);
    repos.countries.create(Country::new("A")).unwrap();
    repos.countries.create(Country::new("B")).unwrap();
    repos.regions.create(Region::new("X", "A")).unwrap();
    repos.regions.create(Region::new("Y", "B")).unwrap();
    let company = Company::new("Acme")
        .operate_in("B")
        .operate_in("A")
        .with_state("Y")
        .with_state("X");

    let countries: Vec<_> = repos
        .company_countries(&company)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(countries, vec!["B", "A"]);

    let states: Vec<_> = repos
        .company_states(&company)
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(states, vec!["Y", "X"]);
}

#[test]
fn test_company_states_fails_on_unknown_name() {
    let store = KeyedStore::in_memory().unwrap();
    let repos = Repositories::new(&store);
    let company = Company::new("Acme").with_state("Nowhere");

    let err = repos.company_states(&company).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.partition(), Some(Partition::States));
}

#[test]
fn test_company_assets_in_state_filters_by_state_name() {
    let store = KeyedStore::in_memory().unwrap();
    let repos = Repositories::new(&store);
    let company = repos.companies.create(Company::new("Acme")).unwrap();

    let plant = repos
        .attach_asset(Asset::new("Plant", company.index).located_in("X"))
        .unwrap();
    repos
        .attach_asset(Asset::new("Mine", company.index).located_in("Y"))
        .unwrap();
    repos.attach_asset(Asset::new("HQ", company.index)).unwrap();

    let company = repos.companies.retrieve_by_index(company.index).unwrap();
    assert_eq!(company.assets.len(), 3);

    let in_x = repos.company_assets_in_state(&company, "X").unwrap();
    assert_eq!(in_x, vec![plant]);
    assert!(repos
        .company_assets_in_state(&company, "Z")
        .unwrap()
        .is_empty());
}

#[test]
fn test_company_assets_in_state_fails_on_dangling_asset() {
    let store = KeyedStore::in_memory().unwrap();
    let repos = Repositories::new(&store);
    let company = repos.companies.create(Company::new("Acme")).unwrap();
    let asset = repos
        .attach_asset(Asset::new("Plant", company.index).located_in("X"))
        .unwrap();
    repos.assets.delete(asset.index).unwrap();

    let company = repos.companies.retrieve_by_index(company.index).unwrap();
    let err = repos.company_assets_in_state(&company, "Y").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.partition(), Some(Partition::Assets));
}

#[test]
fn test_company_states_in_resolves_per_country() {
    let store = KeyedStore::in_memory().unwrap();
    let repos = Repositories::new(&store);
    repos.regions.create(Region::new("Springfield", "A")).unwrap();
    let in_b = repos.regions.create(Region::new("Springfield", "B")).unwrap();
    repos.regions.create(Region::new("Shelbyville", "A")).unwrap();
    let company = Company::new("Acme")
        .with_state("Shelbyville")
        .with_state("Springfield");

    assert_eq!(repos.company_states_in(&company, "B").unwrap(), vec![in_b]);

    let in_a: Vec<_> = repos
        .company_states_in(&company, "A")
        .unwrap()
        .into_iter()
        .map(|r| (r.name, r.country))
        .collect();
    assert_eq!(
        in_a,
        vec![
            ("Shelbyville".to_string(), "A".to_string()),
            ("Springfield".to_string(), "A".to_string()),
        ]
    );
    assert!(repos.company_states_in(&company, "C").unwrap().is_empty());
}
