/// 默认通知中心示例
/// 展示进程级实例的共享、按订阅者退订，以及未注册事件的安全发布
use notification_center::{NotificationCenter, SubscriberId};

struct Inbox {
    owner: &'static str,
}

fn main() -> anyhow::Result<()> {
    let center = NotificationCenter::default_center();

    let alice = Inbox { owner: "alice" };
    let bob = Inbox { owner: "bob" };

    for inbox in [&alice, &bob] {
        let owner = inbox.owner;
        center.subscribe("mail.received", Some(SubscriberId::of(inbox)), move |name| {
            println!("{owner}: got {name}");
        });
    }

    center.publish("mail.received")?;

    // 同一个实例：通过另一次访问退订
    NotificationCenter::default_center().unsubscribe(SubscriberId::of(&alice), "mail.received");
    center.publish("mail.received")?;

    // 没有人订阅过的事件 -> 什么也不发生
    center.publish("mail.bounced")?;
    println!("remaining events: {:?}", center.event_names());
    Ok(())
}
