use trend_motor::HOME_HERO_SLIDER;
use trend_motor::domain::lead::NewCreditApplication;
use trend_motor::domain::motorcycle::{NewMotorcycleImage, NewSpecItem};
use trend_motor::domain::types::{
    MotorcycleImageId, PersonName, PhoneNumber, Slug, SpecGroup, SpecKey,
};
use trend_motor::pagination::Pagination;
use trend_motor::repository::{
    BrandReader, BrandWriter, ContentReader, LeadReader, LeadWriter, MotorcycleImageReader,
    MotorcycleImageWriter, MotorcycleReader, MotorcycleWriter, RepositoryError, SliderReader,
    SpecItemReader, SpecItemWriter,
};

mod common;

#[test]
fn test_migrations_seed_home_hero_and_content() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let slider = repo
        .get_slider_by_slug(&Slug::new(HOME_HERO_SLIDER).unwrap())
        .expect("should query sliders")
        .expect("home hero slider should be seeded");
    assert!(slider.is_active);
    assert!(
        repo.get_slider_settings(slider.id)
            .expect("should query settings")
            .is_some()
    );

    assert!(repo.get_contact_settings().unwrap().is_some());
    assert!(!repo.list_faqs(true).unwrap().is_empty());
}

#[test]
fn duplicate_motorcycle_slug_is_a_conflict() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let brand = common::create_brand(&repo, "Honda");

    common::create_motorcycle(&repo, brand.id, "PCX 125");
    let result = repo.create_motorcycle(&common::new_motorcycle(brand.id, "PCX 125"));

    assert!(matches!(result, Err(RepositoryError::Conflict(_))));
    let (total, _) = repo
        .list_motorcycles(Default::default())
        .expect("should list motorcycles");
    assert_eq!(total, 1);
}

#[test]
fn brand_with_motorcycles_cannot_be_deleted() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let brand = common::create_brand(&repo, "Yamaha");
    common::create_motorcycle(&repo, brand.id, "NMAX 155");

    assert!(repo.delete_brand(brand.id).is_err());
    assert!(repo.get_brand_by_id(brand.id).unwrap().is_some());
    assert_eq!(repo.count_brand_motorcycles(brand.id).unwrap(), 1);
}

#[test]
fn only_one_primary_image_per_motorcycle() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let brand = common::create_brand(&repo, "Kymco");
    let motorcycle = common::create_motorcycle(&repo, brand.id, "Agility 125");

    let add = |path: &str, is_primary: bool| {
        repo.add_motorcycle_image(&NewMotorcycleImage {
            motorcycle_id: motorcycle.id,
            path: path.to_string(),
            alt: None,
            is_primary,
        })
        .expect("should add image")
    };
    let first = add("motorcycles/1/a.jpg", true);
    let second = add("motorcycles/1/b.jpg", true);

    let images = repo.list_motorcycle_images(motorcycle.id).unwrap();
    let primaries: Vec<_> = images.iter().filter(|image| image.is_primary).collect();
    assert_eq!(primaries.len(), 1);
    assert_eq!(primaries[0].id, second.id);

    repo.set_primary_image(motorcycle.id, first.id)
        .expect("should switch primary");
    let images = repo.list_motorcycle_images(motorcycle.id).unwrap();
    let primaries: Vec<_> = images.iter().filter(|image| image.is_primary).collect();
    assert_eq!(primaries.len(), 1);
    assert_eq!(primaries[0].id, first.id);
}

#[test]
fn image_reorder_requires_the_full_set() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let brand = common::create_brand(&repo, "SYM");
    let motorcycle = common::create_motorcycle(&repo, brand.id, "Jet X");

    let ids: Vec<MotorcycleImageId> = ["a.jpg", "b.jpg", "c.jpg"]
        .iter()
        .map(|name| {
            repo.add_motorcycle_image(&NewMotorcycleImage {
                motorcycle_id: motorcycle.id,
                path: format!("motorcycles/1/{name}"),
                alt: None,
                is_primary: false,
            })
            .unwrap()
            .id
        })
        .collect();

    assert!(matches!(
        repo.reorder_motorcycle_images(motorcycle.id, &ids[..2]),
        Err(RepositoryError::ValidationError(_))
    ));

    let order = vec![ids[2], ids[0], ids[1]];
    repo.reorder_motorcycle_images(motorcycle.id, &order)
        .expect("should reorder");
    let reread: Vec<_> = repo
        .list_motorcycle_images(motorcycle.id)
        .unwrap()
        .into_iter()
        .map(|image| image.id)
        .collect();
    assert_eq!(reread, order);
}

#[test]
fn spec_items_are_replaced_as_a_whole() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let brand = common::create_brand(&repo, "CFMoto");
    let motorcycle = common::create_motorcycle(&repo, brand.id, "450 SR");

    let item = |group: &str, key: &str, value: &str| NewSpecItem {
        group: SpecGroup::new(group).unwrap(),
        key: SpecKey::new(key).unwrap(),
        value: value.to_string(),
    };
    repo.replace_spec_items(
        motorcycle.id,
        &[item("Motor", "Hacim", "449 cc"), item("Motor", "Güç", "50 hp")],
    )
    .unwrap();
    repo.replace_spec_items(motorcycle.id, &[item("Şasi", "Ağırlık", "178 kg")])
        .unwrap();

    let items = repo.list_spec_items(motorcycle.id).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].key.as_str(), "Ağırlık");
}

#[test]
fn deleting_a_motorcycle_cascades_and_keeps_leads() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let brand = common::create_brand(&repo, "Bajaj");
    let motorcycle = common::create_motorcycle(&repo, brand.id, "Pulsar NS200");
    repo.add_motorcycle_image(&NewMotorcycleImage {
        motorcycle_id: motorcycle.id,
        path: "motorcycles/1/a.jpg".to_string(),
        alt: None,
        is_primary: true,
    })
    .unwrap();
    repo.create_credit_application(&NewCreditApplication {
        full_name: PersonName::new("Ayşe Yılmaz").unwrap(),
        phone: PhoneNumber::new("+90 555 111 22 33").unwrap(),
        income_range: None,
        motorcycle_id: Some(motorcycle.id),
    })
    .unwrap();

    assert_eq!(repo.delete_motorcycle(motorcycle.id).unwrap(), 1);

    assert!(repo.list_motorcycle_images(motorcycle.id).unwrap().is_empty());
    let (total, leads) = repo
        .list_credit_applications(Pagination::default())
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(leads[0].lead.motorcycle_id, None);
    assert!(leads[0].motorcycle.is_none());
}

#[test]
fn credit_applications_are_listed_newest_first_with_model() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let brand = common::create_brand(&repo, "Honda");
    let motorcycle = common::create_motorcycle(&repo, brand.id, "Forza 250");

    for (name, model) in [("Ali Kaya", None), ("Veli Demir", Some(motorcycle.id))] {
        repo.create_credit_application(&NewCreditApplication {
            full_name: PersonName::new(name).unwrap(),
            phone: PhoneNumber::new("05551112233").unwrap(),
            income_range: Some("20000-40000".to_string()),
            motorcycle_id: model,
        })
        .unwrap();
    }

    let (total, leads) = repo
        .list_credit_applications(Pagination::default())
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(leads[0].lead.full_name.as_str(), "Veli Demir");
    let model = leads[0].motorcycle.as_ref().expect("model should be joined");
    assert_eq!(model.slug, "forza-250");
    assert!(leads[1].motorcycle.is_none());
}
