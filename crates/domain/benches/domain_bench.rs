use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use domain::{
    CustomerEvent, EventDispatcher, EventHandler, Order, OrderItem, OrderService,
};

struct Noop;

impl EventHandler<CustomerEvent> for Noop {
    fn handle(&self, _event: &CustomerEvent) {}
}

fn make_order(id: usize, items: usize) -> Order {
    let items = (0..items)
        .map(|i| OrderItem::new(format!("i{i}"), "Widget", 9.99, format!("p{i}"), 3))
        .collect();
    Order::new(format!("o{id}"), "c1", items).unwrap()
}

fn bench_notify(c: &mut Criterion) {
    let dispatcher = EventDispatcher::<CustomerEvent>::new();
    for _ in 0..8 {
        dispatcher.register(CustomerEvent::CREATED, Arc::new(Noop));
    }
    let event = CustomerEvent::customer_created("123".into(), "Customer 1");

    c.bench_function("domain/notify_8_handlers", |b| {
        b.iter(|| dispatcher.notify(&event));
    });
}

fn bench_order_total(c: &mut Criterion) {
    let order = make_order(0, 100);

    c.bench_function("domain/order_total_100_items", |b| {
        b.iter(|| order.total());
    });
}

fn bench_orders_total(c: &mut Criterion) {
    let orders: Vec<_> = (0..100).map(|i| make_order(i, 10)).collect();

    c.bench_function("domain/service_total_100_orders", |b| {
        b.iter(|| OrderService::total(&orders));
    });
}

criterion_group!(benches, bench_notify, bench_order_total, bench_orders_total);
criterion_main!(benches);
