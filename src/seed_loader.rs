use crate::{
    data_types::{Canteen, Dish},
    db_operations::CanteenStore,
    errors::CatalogResult,
};

struct SampleCanteen {
    name: &'static str,
    location: &'static str,
    description: &'static str,
    dishes: &'static [SampleDish],
}

struct SampleDish {
    name: &'static str,
    description: &'static str,
    category: &'static str,
    price: f64,
    rating: i32,
}

const SAMPLE_DATA: &[SampleCanteen] = &[
    SampleCanteen {
        name: "Main Campus Canteen",
        location: "Building near Ladies Hostel",
        description: "The main canteen serving variety of dishes",
        dishes: &[
            SampleDish {
                name: "Veg Noodles",
                description: "Classic veg noodles with tomato sauce and sweet.",
                category: "Chinese",
                price: 90.0,
                rating: 4,
            },
            SampleDish {
                name: "Chapathi with Kurma",
                description: "2 Chapathis with available vegetables and sweets.",
                category: "Indian",
                price: 35.0,
                rating: 2,
            },
        ],
    },
    SampleCanteen {
        name: "Rishabs Canteen",
        location: "Near SSN Admin Block",
        description: "Healthy and organic food options along with all juices",
        dishes: &[
            SampleDish {
                name: "Veg Noodles",
                description: "Classic veg noodles with tomato sauce and onion raita.",
                category: "Chinese",
                price: 80.0,
                rating: 4,
            },
            SampleDish {
                name: "Chapathi with Kurma",
                description: "3 Chapathis with available kurma and onion raita.",
                category: "Indian",
                price: 40.0,
                rating: 2,
            },
            SampleDish {
                name: "Orange Juice",
                description: "Sweet and tasty Orange",
                category: "Indian",
                price: 50.0,
                rating: 4,
            },
        ],
    },
    SampleCanteen {
        name: "Snow Cubes Canteen",
        location: "Near SSN Admin Block",
        description: "All fancy snacks with cakes and burgers.",
        dishes: &[
            SampleDish {
                name: "Margherita Pizza",
                description: "Classic pizza with tomato sauce and mozzarella cheese",
                category: "Italian",
                price: 140.0,
                rating: 4,
            },
            SampleDish {
                name: "Cheese Burger",
                description: "Beef patty with cheese, lettuce and special sauce",
                category: "American",
                price: 50.0,
                rating: 4,
            },
        ],
    },
    SampleCanteen {
        name: "Ashwins Canteen",
        location: "Near Clock Tower and beside Ladies hostel",
        description: "Stationery, groceries, foods and snacks available",
        dishes: &[
            SampleDish {
                name: "Samosa with sauce",
                description: "Fresh potato samosa",
                category: "Healthy",
                price: 15.0,
                rating: 4,
            },
            SampleDish {
                name: "Potato Chips",
                description: "All variety of chips",
                category: "Healthy",
                price: 20.0,
                rating: 4,
            },
        ],
    },
    SampleCanteen {
        name: "Metro Cafe Canteen",
        location: "Near SSN ECE Block",
        description: "Newly canteen with all variety dishes",
        dishes: &[SampleDish {
            name: "Pani Puri",
            description: "Pani Puri with best filling",
            category: "Indian",
            price: 40.0,
            rating: 5,
        }],
    },
];

/// Fills an empty catalog with the demo canteens and their dishes.
/// Returns `false` without touching anything if any canteen exists.
pub fn seed_if_empty(store: &CanteenStore) -> CatalogResult<bool> {
    if store.count()? > 0 {
        log::info!("Catalog not empty, skipping sample data");
        return Ok(false);
    }

    // canteens first so they get their ids in listing order
    let mut canteens = Vec::with_capacity(SAMPLE_DATA.len());
    for sample in SAMPLE_DATA {
        let mut canteen = Canteen::new(sample.name, Some(sample.location), Some(sample.description));
        store.save(&mut canteen)?;
        canteens.push(canteen);
    }

    let mut dish_count = 0;
    for (canteen, sample) in canteens.iter_mut().zip(SAMPLE_DATA) {
        for dish in sample.dishes {
            canteen.add_dish(Dish::new(
                dish.name,
                Some(dish.description),
                Some(dish.category),
                dish.price,
                dish.rating,
            ));
            dish_count += 1;
        }
        store.save(canteen)?;
    }

    log::info!(
        "Sample data loaded: {} canteens, {} dishes",
        canteens.len(),
        dish_count
    );
    Ok(true)
}
