use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dispatch_map::models::{
    MergeWorkingSet, Position, Route, RouteAccent, RouteKind, Stop, StopKind, StopStatus,
};
use dispatch_map::scene::{collect_bounds, compose_merge, compose_route, RouteViewState};
use uuid::Uuid;

fn make_stop(number: u32, status: StopStatus) -> Stop {
    Stop {
        id: Uuid::new_v4(),
        kind: StopKind::Driver,
        stop_number: number,
        new_stop_number: None,
        address: format!("Stop {number}"),
        position: Some(Position::new(
            52.0 + f64::from(number) * 0.001,
            4.9 + f64::from(number) * 0.001,
        )),
        status,
        arrival_time: None,
        time_frame: None,
        delayed: false,
        delay: None,
        alert: false,
        warning: false,
        selected: false,
        loading_time: None,
        instructions: None,
    }
}

fn make_route(kind: RouteKind, stop_count: u32) -> Route {
    let stops = (1..=stop_count)
        .map(|number| {
            let status = if number % 7 == 0 {
                StopStatus::Cancelled
            } else if number < stop_count / 2 {
                StopStatus::Completed
            } else {
                StopStatus::NotVisited
            };
            make_stop(number, status)
        })
        .collect();
    Route {
        id: Uuid::new_v4(),
        kind,
        stops,
        driver_position: Some(Position::new(52.05, 4.95)),
        driver: None,
        vehicle: None,
        selected: false,
        color_index: Some(0),
        accent: RouteAccent::None,
        driver_trail: (0..50)
            .map(|i| Position::new(52.0 + f64::from(i) * 0.0005, 4.9))
            .collect(),
    }
}

fn benchmark_scene_composition(c: &mut Criterion) {
    // A dispatcher's busy day: 100-stop driver route plus express routes.
    let driver_route = make_route(RouteKind::Driver, 100);
    let express_routes: Vec<Route> = (0..20)
        .map(|_| make_route(RouteKind::Express, 10))
        .collect();
    let all_routes: Vec<Route> = std::iter::once(driver_route.clone())
        .chain(express_routes.iter().cloned())
        .collect();
    let working_set = MergeWorkingSet::from_express_routes(&express_routes);
    let working_set = express_routes
        .iter()
        .flat_map(|route| route.stops.iter().take(3))
        .fold(working_set, |set, stop| set.connect(stop.id));

    c.bench_function("compose_driver_route", |b| {
        b.iter(|| compose_route(black_box(&driver_route), RouteViewState::default()));
    });

    c.bench_function("compose_route_with_trail", |b| {
        b.iter(|| {
            compose_route(
                black_box(&driver_route),
                RouteViewState {
                    show_trail: true,
                    ..RouteViewState::default()
                },
            )
        });
    });

    // What happens on every data refresh: every visible route recomposed.
    c.bench_function("compose_all_routes", |b| {
        b.iter(|| {
            all_routes
                .iter()
                .map(|route| compose_route(black_box(route), RouteViewState::default()))
                .count()
        });
    });

    c.bench_function("compose_merge", |b| {
        b.iter(|| compose_merge(black_box(&working_set)));
    });

    c.bench_function("collect_bounds", |b| {
        b.iter(|| collect_bounds(black_box(&all_routes), Some(black_box(&working_set))));
    });
}

criterion_group!(benches, benchmark_scene_composition);
criterion_main!(benches);
