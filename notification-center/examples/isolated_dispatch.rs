/// 分发模式示例
/// 对比快速失败与隔离分发在回调出错时的差异
use notification_center::{CenterConfig, DispatchMode, NotificationCenter, NotifyError};

fn register(center: &NotificationCenter) {
    center.subscribe("report.generated", None, |name| println!("  archive <- {name}"));
    center.subscribe_fallible("report.generated", None, |_| {
        anyhow::bail!("smtp unavailable")
    });
    center.subscribe("report.generated", None, |name| println!("  audit   <- {name}"));
}

fn describe(result: Result<(), NotifyError>) {
    match result {
        Ok(()) => println!("  delivered"),
        Err(err) => {
            println!("  error: {err}");
            for failure in err.failures() {
                println!("    #{}: {:#}", failure.position, failure.source);
            }
        }
    }
}

fn main() {
    println!("fail fast:");
    let fail_fast = NotificationCenter::new();
    register(&fail_fast);
    describe(fail_fast.publish("report.generated"));

    println!("isolated:");
    let isolated = NotificationCenter::with_config(
        CenterConfig::builder()
            .label("reports")
            .dispatch_mode(DispatchMode::Isolated)
            .build(),
    );
    register(&isolated);
    describe(isolated.publish("report.generated"));
}
