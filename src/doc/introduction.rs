/*!
# Introductory Tutorial

Open a terminal and run the executable. You are greeted by the version
banner and a prompt. Type CTRL-D to leave, or enter `@EXIT`.
<pre><code>&nbsp;  Axe interpreter 0.3.0
&nbsp;axe> █
</code></pre>

Stop a running program with CTRL-C. The session keeps going.

Every line you type is compiled and run at once. Variables live in
calculator memory, which survives from one line to the next.

<pre><code>&nbsp;axe> 5+3->A
&nbsp;axe> Disp A
&nbsp;  8
&nbsp;axe> Disp A*A
&nbsp;  64
</code></pre>

There are 26 variables, `A` through `Z`. Each holds an unsigned 16 bit
number, so storing `-1` leaves `65535` behind. Arithmetic in the middle
of an expression is not limited this way, only the store wraps.

A line may hold several statements separated by `:`. Blocks such as
`If` and `While` need an `End` on the same line when typed at the
prompt, since each line is a complete program.

<pre><code>&nbsp;axe> 0->I:While I<3:Disp I:I++:End
&nbsp;  0
&nbsp;  1
&nbsp;  2
</code></pre>

Longer programs belong in a file. Run them with `axe run file.axe`.

<pre><code>&nbsp;.COUNT TO FIVE
&nbsp;0->A
&nbsp;Lbl LOOP
&nbsp;A+1->A
&nbsp;If A<5
&nbsp;Goto LOOP
&nbsp;End
&nbsp;Disp A
</code></pre>

A `.` starts a comment that runs to the end of the line. Text between
two `...` markers is a comment that may span lines.

## Keys

`getKey(n)` is true while the key with calculator code `n` is held.
`getKey(0)` asks about any key. Computer keys are mapped to calculator
codes by `keybindings.config`; pass a different file with `--keys`.

<pre><code>&nbsp;Repeat getKey(15)
&nbsp;Disp rand^6
&nbsp;Pause 900
&nbsp;End
</code></pre>

This prints dice rolls twice a second until CLEAR, which the default
table puts on BACKSPACE, is held.

## Looking inside

`axe --test lexer` prints the tokens of each line, `axe --test parser`
prints the syntax tree and the instruction listing. `@DEBUG 1` makes
the machine report every instruction it executes along with the
evaluation stack. `@DEBUG 0` turns it off again.

*/
