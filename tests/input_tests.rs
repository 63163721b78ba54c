//! 交互输入测试：中断后进程不能被挂起的 stdin 读取拖住

#![cfg(feature = "cli")]

use std::io::{self, BufReader, Read};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use nwo_lookup::interfaces::cli::input::LineReader;
use nwo_lookup::system::signal::{Interruptible, run_until};

/// 一直阻塞到发送端被丢弃的 reader（模拟没人按回车的终端）
struct StalledTerminal(mpsc::Receiver<()>);

impl Read for StalledTerminal {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        let _ = self.0.recv();
        Ok(0)
    }
}

#[cfg(test)]
mod input_tests {
    use super::*;

    #[test]
    fn test_interrupt_during_prompt_does_not_block_shutdown() {
        let (_keep_blocked, rx) = mpsc::channel::<()>();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();

        let outcome = runtime.block_on(async {
            let mut reader = LineReader::spawn(BufReader::new(StalledTerminal(rx))).unwrap();
            run_until(reader.next_line(), tokio::time::sleep(Duration::from_millis(50))).await
        });
        assert!(matches!(outcome, Interruptible::Interrupted));

        // 运行时关闭不应等待仍在阻塞的读取
        let started = Instant::now();
        drop(runtime);
        assert!(
            started.elapsed() < Duration::from_secs(1),
            "runtime shutdown waited {:?}",
            started.elapsed()
        );
    }

    #[tokio::test]
    async fn test_line_survives_cancelled_wait() {
        let (tx, rx) = mpsc::channel::<()>();
        let mut reader = LineReader::spawn(BufReader::new(StalledTerminal(rx))).unwrap();

        let first = run_until(reader.next_line(), async {}).await;
        assert!(matches!(first, Interruptible::Interrupted));

        // 解除阻塞：StalledTerminal 返回 EOF
        drop(tx);
        assert_eq!(reader.next_line().await.unwrap(), None);
    }
}
