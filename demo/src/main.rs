use notification_center::{NotificationCenter, SubscriberId};
use tracing_subscriber::EnvFilter;

const EVENT_1: &str = "notificationEvent1";
const EVENT_2: &str = "notificationEvent2";

/// 在构造时向默认通知中心登记两个事件的观察者
struct Listener {
    name: &'static str,
}

impl Listener {
    fn new(name: &'static str) -> Box<Self> {
        // 放入堆上，使地址在移动后保持不变
        let listener = Box::new(Self { name });
        let center = NotificationCenter::default_center();
        let me = SubscriberId::of(&*listener);

        for event in [EVENT_1, EVENT_2] {
            center.subscribe(event, Some(me), move |raised_by| {
                println!("I'm {name} and I have been raised by {raised_by}");
            });
        }
        listener
    }

    fn stop_listening(&self) {
        let center = NotificationCenter::default_center();
        let me = SubscriberId::of(self);
        center.unsubscribe(me, EVENT_1);
        center.unsubscribe(me, EVENT_2);
        tracing::info!(listener = self.name, "stopped listening");
    }
}

/// 只负责发布事件
struct Broadcaster;

impl Broadcaster {
    fn announce(&self) -> anyhow::Result<()> {
        let center = NotificationCenter::default_center();
        center.publish(EVENT_1)?;
        center.publish(EVENT_2)?;
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let listener_a = Listener::new("ListenerA");
    let listener_b = Listener::new("ListenerB");

    Broadcaster.announce()?;

    listener_a.stop_listening();
    listener_b.stop_listening();

    // 所有观察者都已退订，再次发布不会有任何输出
    Broadcaster.announce()?;
    tracing::info!(
        remaining = ?NotificationCenter::default_center().event_names(),
        "demo finished"
    );
    Ok(())
}
