mod tests {
    use tricolor_dimmer::{ByteQueue, InboundQueue, Rgb, TrySendError};

    #[test]
    fn test_take_message_needs_three_bytes() {
        let queue: InboundQueue<8> = InboundQueue::new();
        let sender = queue.sender();

        sender.try_send_all(&[1, 2]).unwrap();
        assert_eq!(queue.take_message(), None);
        assert_eq!(queue.buffered(), 2);

        sender.try_send(3).unwrap();
        assert_eq!(queue.take_message(), Some(Rgb::new(1, 2, 3)));
        assert_eq!(queue.buffered(), 0);
    }

    #[test]
    fn test_receive_is_fifo() {
        let queue: InboundQueue<8> = InboundQueue::new();
        queue.sender().try_send_all(&[5, 6, 7, 8]).unwrap();
        assert_eq!(queue.receive(), Some(5));
        assert_eq!(queue.take_message(), Some(Rgb::new(6, 7, 8)));
        assert_eq!(queue.receive(), None);
    }

    #[test]
    fn test_flush_reports_dropped_bytes() {
        let queue: InboundQueue<8> = InboundQueue::new();
        queue.sender().try_send_all(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(queue.flush(), 5);
        assert_eq!(queue.buffered(), 0);
        assert_eq!(queue.flush(), 0);
    }

    #[test]
    fn test_full_queue_rejects_byte() {
        let queue: InboundQueue<4> = InboundQueue::new();
        let sender = queue.sender();
        assert_eq!(sender.try_send_all(&[1, 2, 3, 4, 5, 6]), Err(TrySendError(5)));
        assert_eq!(queue.buffered(), 4);
        assert_eq!(queue.take_message(), Some(Rgb::new(1, 2, 3)));
        assert_eq!(sender.try_send(9), Ok(()));
    }
}
